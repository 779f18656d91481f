//! Linear filtering utilities

/// Steady-state initial conditions for an FIR filter `b` (denominator `[1]`).
///
/// Returns the transposed direct-form II state that the filter would hold
/// after a unit step had been applied forever, so a step input produces no
/// start-up transient. Scale by the first input sample before filtering.
pub fn lfilter_zi(b: &[f64]) -> Vec<f64> {
    let order = b.len().saturating_sub(1);
    (0..order).map(|i| b[i + 1..].iter().sum()).collect()
}

/// Filter `x` with FIR numerator `b` (denominator `[1]`), starting from
/// state `zi` (transposed direct-form II, `len(b) - 1` entries).
pub fn lfilter(b: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    if b.is_empty() {
        return vec![0.0; x.len()];
    }
    let order = b.len() - 1;
    let mut state = vec![0.0; order];
    for (s, &z) in state.iter_mut().zip(zi) {
        *s = z;
    }

    let mut output = Vec::with_capacity(x.len());
    for &sample in x {
        let y = b[0] * sample + state.first().copied().unwrap_or(0.0);
        for i in 0..order {
            let next = state.get(i + 1).copied().unwrap_or(0.0);
            state[i] = b[i + 1] * sample + next;
        }
        output.push(y);
    }

    output
}

/// Pre-emphasis filter `y[n] = x[n] - coefficient * x[n-1]`.
///
/// The filter starts in steady state for the first sample, so
/// `y[0] = (1 - coefficient) * x[0]`. Zero in, zero out.
pub fn pre_emphasis(samples: &[f64], coefficient: f64) -> Vec<f64> {
    let Some(&first) = samples.first() else {
        return vec![];
    };

    let b = [1.0, -coefficient];
    let zi: Vec<f64> = lfilter_zi(&b).iter().map(|z| z * first).collect();
    lfilter(&b, samples, &zi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfilter_zi_first_order() {
        let zi = lfilter_zi(&[1.0, -0.97]);
        assert_eq!(zi.len(), 1);
        assert!((zi[0] + 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_lfilter_zi_higher_order() {
        let zi = lfilter_zi(&[0.5, 0.25, 0.125]);
        assert!((zi[0] - 0.375).abs() < 1e-12);
        assert!((zi[1] - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_lfilter_matches_difference_equation() {
        let b = [1.0, 2.0, -1.0];
        let x = [1.0, 0.0, 0.0, 3.0];
        let y = lfilter(&b, &x, &[0.0, 0.0]);
        assert_eq!(y, vec![1.0, 2.0, -1.0, 3.0]);
    }

    #[test]
    fn test_step_has_no_transient() {
        let b = [0.5, 0.25, 0.125];
        let zi = lfilter_zi(&b);
        let y = lfilter(&b, &[1.0; 6], &zi);
        for v in y {
            assert!((v - 0.875).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pre_emphasis() {
        // The initial state is scaled by x[0], so y[0] is (1 - c) * x[0];
        // an unscaled steady-state start would give x[0] - c instead.
        let y = pre_emphasis(&[1.0, 2.0, 0.5], 0.97);
        assert!((y[0] - 0.03).abs() < 1e-12);
        assert!((y[1] - (2.0 - 0.97)).abs() < 1e-12);
        assert!((y[2] - (0.5 - 1.94)).abs() < 1e-12);
    }

    #[test]
    fn test_pre_emphasis_zero_and_empty() {
        assert!(pre_emphasis(&[], 0.97).is_empty());
        assert!(pre_emphasis(&[0.0; 64], 0.97).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_pre_emphasis_constant_signal() {
        let y = pre_emphasis(&[0.4; 32], 0.97);
        for v in y {
            assert!((v - 0.4 * 0.03).abs() < 1e-12);
        }
    }
}

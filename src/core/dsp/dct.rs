//! Discrete cosine transforms (types I, II and III)
//!
//! Unnormalized outputs follow the FFTPACK conventions (type II carries a
//! factor of 2, type III is its unscaled inverse up to `2N`). Orthonormal
//! scaling is available for types II and III.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{MfccError, Result};

/// DCT variant. Serialized as its number (`1`, `2`, `3`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DctType {
    One,
    #[default]
    Two,
    Three,
}

impl TryFrom<u8> for DctType {
    type Error = MfccError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(MfccError::configuration(format!(
                "unsupported DCT type {} (expected 1, 2 or 3)",
                other
            ))),
        }
    }
}

impl From<DctType> for u8 {
    fn from(value: DctType) -> Self {
        match value {
            DctType::One => 1,
            DctType::Two => 2,
            DctType::Three => 3,
        }
    }
}

/// DCT output scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DctNorm {
    None,
    #[default]
    Ortho,
}

impl DctNorm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "ortho" => Some(Self::Ortho),
            _ => None,
        }
    }
}

/// Reject type/normalization/length combinations that have no definition
pub fn check_dct(dct_type: DctType, norm: DctNorm, len: usize) -> Result<()> {
    match (dct_type, norm) {
        (DctType::One, DctNorm::Ortho) => Err(MfccError::configuration(
            "orthonormal scaling is not supported for DCT type 1",
        )),
        (DctType::One, _) if len < 2 => Err(MfccError::configuration(
            "DCT type 1 needs at least 2 input points",
        )),
        _ => Ok(()),
    }
}

/// Transform `input` (length `N`) into `N` cosine coefficients
pub fn dct(input: &[f64], dct_type: DctType, norm: DctNorm) -> Result<Vec<f64>> {
    let n = input.len();
    check_dct(dct_type, norm, n)?;
    if n == 0 {
        return Ok(vec![]);
    }

    let out = match dct_type {
        DctType::One => dct1(input),
        DctType::Two => dct2(input, norm),
        DctType::Three => dct3(input, norm),
    };
    Ok(out)
}

fn dct1(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let last = x[n - 1];
    let denom = (n - 1) as f64;
    (0..n)
        .map(|k| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let inner: f64 = x[1..n - 1]
                .iter()
                .enumerate()
                .map(|(j, &v)| v * (PI * k as f64 * (j + 1) as f64 / denom).cos())
                .sum();
            x[0] + sign * last + 2.0 * inner
        })
        .collect()
}

fn dct2(x: &[f64], norm: DctNorm) -> Vec<f64> {
    let n = x.len() as f64;
    (0..x.len())
        .map(|k| {
            let sum: f64 = x
                .iter()
                .enumerate()
                .map(|(i, &v)| v * (PI * k as f64 * (2 * i + 1) as f64 / (2.0 * n)).cos())
                .sum();
            let y = 2.0 * sum;
            match norm {
                DctNorm::None => y,
                DctNorm::Ortho if k == 0 => y * (1.0 / (4.0 * n)).sqrt(),
                DctNorm::Ortho => y * (1.0 / (2.0 * n)).sqrt(),
            }
        })
        .collect()
}

fn dct3(x: &[f64], norm: DctNorm) -> Vec<f64> {
    let n = x.len() as f64;
    (0..x.len())
        .map(|k| {
            let tail: f64 = x[1..]
                .iter()
                .enumerate()
                .map(|(j, &v)| v * (PI * (2 * k + 1) as f64 * (j + 1) as f64 / (2.0 * n)).cos())
                .sum();
            match norm {
                DctNorm::None => x[0] + 2.0 * tail,
                DctNorm::Ortho => x[0] / n.sqrt() + (2.0 / n).sqrt() * tail,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_dct2_known_values() {
        // Reference values from the FFTPACK definition
        let y = dct(&[1.0, 2.0, 3.0, 4.0], DctType::Two, DctNorm::None).unwrap();
        assert!(approx(
            &y,
            &[20.0, -6.308644059797899, 0.0, -0.44834152916796777],
            1e-9
        ));

        let y = dct(&[1.0, 2.0, 3.0, 4.0], DctType::Two, DctNorm::Ortho).unwrap();
        assert!(approx(
            &y,
            &[5.0, -2.230442497387663, 0.0, -0.15851266778110776],
            1e-9
        ));
    }

    #[test]
    fn test_dct1_known_values() {
        let y = dct(&[1.0, 2.0, 3.0, 4.0], DctType::One, DctNorm::None).unwrap();
        assert!(approx(&y, &[15.0, -4.0, 0.0, -1.0], 1e-9));
    }

    #[test]
    fn test_ortho_dct2_dct3_are_inverse() {
        let x = [0.3, -1.2, 4.5, 0.0, 2.25, -0.75, 1.0];
        let forward = dct(&x, DctType::Two, DctNorm::Ortho).unwrap();
        let back = dct(&forward, DctType::Three, DctNorm::Ortho).unwrap();
        assert!(approx(&back, &x, 1e-9));
    }

    #[test]
    fn test_unnormalized_dct3_inverts_with_2n_scale() {
        let x = [1.0, -2.0, 0.5, 3.0];
        let forward = dct(&x, DctType::Two, DctNorm::None).unwrap();
        let back: Vec<f64> = dct(&forward, DctType::Three, DctNorm::None)
            .unwrap()
            .iter()
            .map(|v| v / (2.0 * x.len() as f64))
            .collect();
        assert!(approx(&back, &x, 1e-9));
    }

    #[test]
    fn test_ortho_preserves_energy() {
        let x: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
        let y = dct(&x, DctType::Two, DctNorm::Ortho).unwrap();
        let ex: f64 = x.iter().map(|v| v * v).sum();
        let ey: f64 = y.iter().map(|v| v * v).sum();
        assert!((ex - ey).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_combinations() {
        let err = dct(&[1.0, 2.0], DctType::One, DctNorm::Ortho).unwrap_err();
        assert!(err.is_configuration());
        assert!(dct(&[1.0], DctType::One, DctNorm::None).is_err());
        assert!(DctType::try_from(4).is_err());
        assert_eq!(DctType::try_from(3).unwrap(), DctType::Three);
        assert_eq!(u8::from(DctType::Two), 2);
    }
}

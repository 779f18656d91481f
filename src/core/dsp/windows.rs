//! Window function implementations

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    #[default]
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "hann" | "hanning" => Some(Self::Hann),
            "hamming" => Some(Self::Hamming),
            "blackman" => Some(Self::Blackman),
            "rectangular" | "boxcar" | "rect" => Some(Self::Rectangular),
            _ => None,
        }
    }
}

/// Create a periodic window of `size` samples.
///
/// Periodic windows divide by `N` rather than `N - 1`, which is what frame
/// based spectral analysis expects (the window tiles when overlapped).
pub fn create_window(size: usize, window_type: WindowType) -> Vec<f64> {
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = i as f64;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * (2.0 * PI * x / n).cos(),
                WindowType::Hamming => 0.54 - 0.46 * (2.0 * PI * x / n).cos(),
                WindowType::Blackman => {
                    0.42 - 0.5 * (2.0 * PI * x / n).cos() + 0.08 * (4.0 * PI * x / n).cos()
                }
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = create_window(4, WindowType::Hann);
        assert!(window[0].abs() < 1e-12); // zero at the left edge
        assert!((window[2] - 1.0).abs() < 1e-12); // peak at N/2
        assert!((window[1] - 0.5).abs() < 1e-12);
        assert!((window[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hann_is_periodic() {
        // A periodic window of length N equals the first N points of a
        // symmetric window of length N + 1
        let n = 400;
        let periodic = create_window(n, WindowType::Hann);
        for (i, &w) in periodic.iter().enumerate() {
            let symmetric = 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos();
            assert!((w - symmetric).abs() < 1e-12);
        }
        assert!((periodic[n / 2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_names() {
        assert_eq!(WindowType::from_name("Hanning"), Some(WindowType::Hann));
        assert_eq!(WindowType::from_name("boxcar"), Some(WindowType::Rectangular));
        assert_eq!(WindowType::from_name("kaiser"), None);
        assert!(create_window(8, WindowType::Rectangular).iter().all(|&w| w == 1.0));
    }
}

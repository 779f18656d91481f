//! Digital Signal Processing utilities
//!
//! The MFCC pipeline only talks to [`SpectralBackend`]; [`RealFftBackend`]
//! is the default implementation built from the modules below.

pub mod dct;
pub mod fft;
pub mod filters;
pub mod mel;
pub mod stats;
pub mod windows;

pub use dct::{check_dct, DctNorm, DctType};
pub use fft::{frame_count, StftProcessor};
pub use filters::{lfilter, lfilter_zi, pre_emphasis};
pub use mel::{FilterbankOptions, MelNorm};
pub use stats::DecibelScale;
pub use windows::{create_window, WindowType};

use crate::core::matrix::Matrix;
use crate::error::Result;

/// Numeric primitives the feature pipeline is built on
pub trait SpectralBackend: Send + Sync {
    /// `|STFT|` as `[fft_size/2 + 1 × n_frames]`, frames taken without centering
    fn stft_magnitude(
        &self,
        samples: &[f64],
        fft_size: usize,
        hop_size: usize,
        window: WindowType,
    ) -> Result<Matrix>;

    /// Mel filterbank `[n_mels × fft_size/2 + 1]`
    fn mel_filterbank(
        &self,
        sample_rate: u32,
        fft_size: usize,
        options: &FilterbankOptions,
    ) -> Result<Matrix>;

    fn power_to_db(&self, power: &Matrix, scale: &DecibelScale) -> Matrix;

    /// One-dimensional DCT of `input`, same length as the input
    fn dct(&self, input: &[f64], dct_type: DctType, norm: DctNorm) -> Result<Vec<f64>>;
}

/// Default backend: `realfft` STFT plus the in-crate filterbank, dB and DCT
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFftBackend;

impl SpectralBackend for RealFftBackend {
    fn stft_magnitude(
        &self,
        samples: &[f64],
        fft_size: usize,
        hop_size: usize,
        window: WindowType,
    ) -> Result<Matrix> {
        StftProcessor::new(fft_size, hop_size, window).magnitude_spectrogram(samples)
    }

    fn mel_filterbank(
        &self,
        sample_rate: u32,
        fft_size: usize,
        options: &FilterbankOptions,
    ) -> Result<Matrix> {
        mel::mel_filterbank(sample_rate, fft_size, options)
    }

    fn power_to_db(&self, power: &Matrix, scale: &DecibelScale) -> Matrix {
        stats::power_to_db(power, scale)
    }

    fn dct(&self, input: &[f64], dct_type: DctType, norm: DctNorm) -> Result<Vec<f64>> {
        dct::dct(input, dct_type, norm)
    }
}

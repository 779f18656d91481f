//! mfcc-extract - Mel-frequency cepstral coefficients for speech features
//!
//! Computes a `[coefficients × frames]` MFCC matrix from one in-memory
//! waveform:
//!
//! waveform → pre-emphasis → STFT (Hann, 25 ms / 10 ms, no centering)
//! → 128-band mel power spectrogram (0–8 kHz, area-normalized filters)
//! → dB → type II orthonormal DCT → first 13 coefficients
//! → optional log-energy substitution or removal of coefficient 0
//! → optional cepstral mean normalization
//!
//! ## Module Structure
//!
//! - `core` - Feature pipeline, DSP backend, audio decoding
//! - `cli` - Command-line interface
//! - `config` - Analysis parameters
//! - `error` - Library error type
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mfcc_extract::{mfcc, MfccConfig, ZerothCoefficient};
//!
//! let config = MfccConfig::builder()
//!     .zeroth_coefficient(ZerothCoefficient::Energy)
//!     .cepstral_mean_norm(true)
//!     .build()?;
//!
//! let coefs = mfcc(&waveform, &config)?;
//! println!("{} x {}", coefs.rows(), coefs.cols());
//! ```
//!
//! ## Defaults
//!
//! | Parameter      | Value          |
//! |----------------|----------------|
//! | sample rate    | 16000 Hz       |
//! | fft / hop      | 400 / 160      |
//! | mel bands      | 128, 0–8000 Hz |
//! | coefficients   | 13             |
//! | DCT            | type 2, ortho  |
//! | pre-emphasis   | 0.97           |
//!
//! Input is never resampled; callers are expected to supply audio at the
//! configured sample rate.

// Feature pipeline and DSP
pub mod core;

// Command-line interface
pub mod cli;

// Analysis parameters
pub mod config;

pub mod error;

pub use config::{
    DctNorm, DctType, DecibelScale, FilterbankOptions, MeanNormAxis, MelNorm, MfccConfig,
    MfccConfigBuilder, WindowType, ZerothCoefficient,
};
pub use crate::core::analysis::{log_energy, mel_spectrogram, mfcc, pre_emphasize};
pub use crate::core::{FeatureExtractor, Matrix, RealFftBackend, SpectralBackend};
pub use error::{MfccError, Result};

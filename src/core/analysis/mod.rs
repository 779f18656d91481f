//! Audio feature analysis
//!
//! - MFCC extraction (pre-emphasis, mel spectrogram, log-energy, cepstra)

mod mfcc;

pub use mfcc::{
    cepstral_mean_normalize, log_energy, mel_spectrogram, mfcc, pre_emphasize, FeatureExtractor,
};

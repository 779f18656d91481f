//! Feature extraction pipeline, DSP primitives and audio decoding

pub mod analysis;
pub mod decoder;
pub mod dsp;
pub mod matrix;

pub use analysis::FeatureExtractor;
pub use decoder::{decode_audio, extract_mono, AudioData};
pub use dsp::{RealFftBackend, SpectralBackend};
pub use matrix::Matrix;

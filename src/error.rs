//! Error types for feature extraction

use thiserror::Error;

/// Errors raised by the MFCC pipeline and its spectral backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MfccError {
    /// The waveform cannot be analyzed (empty, too short, non-finite samples)
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Parameters are inconsistent or unsupported
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The spectral backend failed while processing valid input
    #[error("spectral backend error: {0}")]
    Backend(String),
}

impl MfccError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, MfccError>;

//! Configuration module for MFCC extraction

mod params;

pub use params::{MeanNormAxis, MfccConfig, MfccConfigBuilder, ZerothCoefficient};
pub use crate::core::dsp::{DctNorm, DctType, DecibelScale, FilterbankOptions, MelNorm, WindowType};

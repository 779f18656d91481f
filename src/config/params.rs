// src/config/params.rs
//
// MFCC analysis parameters, validation and JSON loading

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::dsp::{check_dct, DctNorm, DctType, DecibelScale, FilterbankOptions, WindowType};
use crate::error::{MfccError, Result};

/// What to do with the zeroth cepstral coefficient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZerothCoefficient {
    /// Leave the DCT output untouched
    #[default]
    Keep,
    /// Replace row 0 with per-frame log-energy in dB
    Energy,
    /// Drop row 0
    Remove,
}

impl ZerothCoefficient {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "keep" | "none" => Some(Self::Keep),
            "energy" => Some(Self::Energy),
            "remove" | "drop" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// Axis along which cepstral mean normalization subtracts the mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeanNormAxis {
    /// Per coefficient, averaged over frames
    #[default]
    Time,
    /// Per frame, averaged over coefficients
    Coefficient,
}

/// Full set of MFCC analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MfccConfig {
    /// Expected sample rate of the waveform in Hz (never resampled)
    pub sample_rate: u32,
    /// Number of cepstral coefficients kept from the DCT
    pub n_mfcc: usize,
    /// FFT and window length in samples
    pub fft_size: usize,
    /// Frame advance in samples
    pub hop_size: usize,
    pub window: WindowType,
    /// Exponent applied to the magnitude spectrogram
    pub power: f64,
    /// Pre-emphasis coefficient
    pub pre_emphasis: f64,
    pub dct_type: DctType,
    pub dct_norm: DctNorm,
    pub zeroth_coefficient: ZerothCoefficient,
    pub cepstral_mean_norm: bool,
    pub mean_norm_axis: MeanNormAxis,
    pub decibel: DecibelScale,
    pub filterbank: FilterbankOptions,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            n_mfcc: 13,
            fft_size: 400,
            hop_size: 160,
            window: WindowType::Hann,
            power: 2.0,
            pre_emphasis: 0.97,
            dct_type: DctType::Two,
            dct_norm: DctNorm::Ortho,
            zeroth_coefficient: ZerothCoefficient::Keep,
            cepstral_mean_norm: false,
            mean_norm_axis: MeanNormAxis::Time,
            decibel: DecibelScale::default(),
            filterbank: FilterbankOptions::default(),
        }
    }
}

impl MfccConfig {
    pub fn builder() -> MfccConfigBuilder {
        MfccConfigBuilder::new()
    }

    /// Number of rows `mfcc` returns
    pub fn output_coefficients(&self) -> usize {
        match self.zeroth_coefficient {
            ZerothCoefficient::Remove => self.n_mfcc.saturating_sub(1),
            _ => self.n_mfcc,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(MfccError::configuration("sample_rate must be positive"));
        }
        if self.fft_size == 0 {
            return Err(MfccError::configuration("fft_size must be positive"));
        }
        if self.hop_size == 0 {
            return Err(MfccError::configuration("hop_size must be positive"));
        }
        if !(self.power > 0.0) || !self.power.is_finite() {
            return Err(MfccError::configuration(format!(
                "power must be a positive number, got {}",
                self.power
            )));
        }
        if !(0.0..1.0).contains(&self.pre_emphasis) {
            return Err(MfccError::configuration(format!(
                "pre_emphasis must lie in [0, 1), got {}",
                self.pre_emphasis
            )));
        }

        self.filterbank.validate(self.sample_rate)?;
        self.decibel.validate()?;
        check_dct(self.dct_type, self.dct_norm, self.filterbank.n_mels)?;

        if self.n_mfcc == 0 {
            return Err(MfccError::configuration("n_mfcc must be positive"));
        }
        if self.n_mfcc > self.filterbank.n_mels {
            return Err(MfccError::configuration(format!(
                "n_mfcc ({}) exceeds the number of mel bands ({})",
                self.n_mfcc, self.filterbank.n_mels
            )));
        }
        if self.zeroth_coefficient == ZerothCoefficient::Remove && self.n_mfcc == 1 {
            return Err(MfccError::configuration(
                "removing the zeroth coefficient of a single-coefficient output leaves nothing",
            ));
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MfccError::configuration(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MfccError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Chainable construction of an [`MfccConfig`]
#[derive(Debug, Clone, Default)]
pub struct MfccConfigBuilder {
    config: MfccConfig,
}

impl MfccConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MfccConfig::default(),
        }
    }

    pub fn from_config(config: MfccConfig) -> Self {
        Self { config }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    pub fn n_mfcc(mut self, n_mfcc: usize) -> Self {
        self.config.n_mfcc = n_mfcc;
        self
    }

    pub fn fft_size(mut self, fft_size: usize) -> Self {
        self.config.fft_size = fft_size;
        self
    }

    pub fn hop_size(mut self, hop_size: usize) -> Self {
        self.config.hop_size = hop_size;
        self
    }

    pub fn window(mut self, window: WindowType) -> Self {
        self.config.window = window;
        self
    }

    pub fn power(mut self, power: f64) -> Self {
        self.config.power = power;
        self
    }

    pub fn pre_emphasis(mut self, coefficient: f64) -> Self {
        self.config.pre_emphasis = coefficient;
        self
    }

    pub fn dct(mut self, dct_type: DctType, norm: DctNorm) -> Self {
        self.config.dct_type = dct_type;
        self.config.dct_norm = norm;
        self
    }

    pub fn zeroth_coefficient(mut self, policy: ZerothCoefficient) -> Self {
        self.config.zeroth_coefficient = policy;
        self
    }

    pub fn cepstral_mean_norm(mut self, enabled: bool) -> Self {
        self.config.cepstral_mean_norm = enabled;
        self
    }

    pub fn mean_norm_axis(mut self, axis: MeanNormAxis) -> Self {
        self.config.mean_norm_axis = axis;
        self
    }

    pub fn top_db(mut self, top_db: Option<f64>) -> Self {
        self.config.decibel.top_db = top_db;
        self
    }

    pub fn n_mels(mut self, n_mels: usize) -> Self {
        self.config.filterbank.n_mels = n_mels;
        self
    }

    pub fn freq_range(mut self, fmin: f64, fmax: Option<f64>) -> Self {
        self.config.filterbank.fmin = fmin;
        self.config.filterbank.fmax = fmax;
        self
    }

    pub fn filterbank(mut self, options: FilterbankOptions) -> Self {
        self.config.filterbank = options;
        self
    }

    pub fn build(self) -> Result<MfccConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// src/core/dsp/mel.rs
//
// Mel scale conversions and triangular filterbank construction

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::matrix::Matrix;
use crate::error::{MfccError, Result};

/// Slaney scale: linear up to 1 kHz, logarithmic above
const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Filter weight normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MelNorm {
    /// Peak of every triangle is 1
    None,
    /// Every triangle has unit area in Hz
    #[default]
    Slaney,
}

/// Mel filterbank parameters. The sample rate and FFT size come from the
/// surrounding analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterbankOptions {
    /// Number of mel bands
    pub n_mels: usize,
    /// Lowest band edge in Hz
    pub fmin: f64,
    /// Highest band edge in Hz, `None` for Nyquist
    pub fmax: Option<f64>,
    /// Use the HTK mel formula instead of Slaney's
    pub htk: bool,
    pub norm: MelNorm,
}

impl Default for FilterbankOptions {
    fn default() -> Self {
        Self {
            n_mels: 128,
            fmin: 0.0,
            fmax: None,
            htk: false,
            norm: MelNorm::Slaney,
        }
    }
}

impl FilterbankOptions {
    /// Upper edge, resolved against the sample rate
    pub fn resolved_fmax(&self, sample_rate: u32) -> f64 {
        self.fmax.unwrap_or(sample_rate as f64 / 2.0)
    }

    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        if self.n_mels == 0 {
            return Err(MfccError::configuration("n_mels must be positive"));
        }
        let nyquist = sample_rate as f64 / 2.0;
        let fmax = self.resolved_fmax(sample_rate);
        if !self.fmin.is_finite() || self.fmin < 0.0 {
            return Err(MfccError::configuration(format!(
                "fmin must be a non-negative frequency, got {}",
                self.fmin
            )));
        }
        if !fmax.is_finite() || fmax > nyquist {
            return Err(MfccError::configuration(format!(
                "fmax {} Hz exceeds the Nyquist frequency {} Hz",
                fmax, nyquist
            )));
        }
        if self.fmin >= fmax {
            return Err(MfccError::configuration(format!(
                "fmin ({} Hz) must be below fmax ({} Hz)",
                self.fmin, fmax
            )));
        }
        Ok(())
    }
}

pub fn hz_to_mel(hz: f64, htk: bool) -> f64 {
    if htk {
        return 2595.0 * (1.0 + hz / 700.0).log10();
    }
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

pub fn mel_to_hz(mel: f64, htk: bool) -> f64 {
    if htk {
        return 700.0 * (10f64.powf(mel / 2595.0) - 1.0);
    }
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// `n` frequencies evenly spaced on the mel scale between `fmin` and `fmax`
pub fn mel_frequencies(n: usize, fmin: f64, fmax: f64, htk: bool) -> Vec<f64> {
    let lo = hz_to_mel(fmin, htk);
    let hi = hz_to_mel(fmax, htk);
    match n {
        0 => vec![],
        1 => vec![mel_to_hz(lo, htk)],
        _ => (0..n)
            .map(|i| mel_to_hz(lo + (hi - lo) * i as f64 / (n - 1) as f64, htk))
            .collect(),
    }
}

/// Centre frequencies of the `fft_size/2 + 1` real FFT bins
pub fn fft_frequencies(sample_rate: u32, fft_size: usize) -> Vec<f64> {
    (0..=fft_size / 2)
        .map(|k| k as f64 * sample_rate as f64 / fft_size as f64)
        .collect()
}

/// Triangular mel filterbank, `[n_mels × fft_size/2 + 1]`.
///
/// Each band `i` rises from edge `i` to edge `i + 1` and falls to edge
/// `i + 2`, with `n_mels + 2` edges spaced evenly in mel.
pub fn mel_filterbank(
    sample_rate: u32,
    fft_size: usize,
    options: &FilterbankOptions,
) -> Result<Matrix> {
    if sample_rate == 0 || fft_size == 0 {
        return Err(MfccError::configuration(
            "sample_rate and fft_size must be positive",
        ));
    }
    options.validate(sample_rate)?;

    let n_mels = options.n_mels;
    let fmax = options.resolved_fmax(sample_rate);
    let fft_freqs = fft_frequencies(sample_rate, fft_size);
    let mel_f = mel_frequencies(n_mels + 2, options.fmin, fmax, options.htk);
    let fdiff: Vec<f64> = mel_f.windows(2).map(|w| w[1] - w[0]).collect();

    let mut weights = Matrix::zeros(n_mels, fft_freqs.len());
    let mut empty_bands = 0usize;

    for i in 0..n_mels {
        let norm = match options.norm {
            MelNorm::Slaney => 2.0 / (mel_f[i + 2] - mel_f[i]),
            MelNorm::None => 1.0,
        };
        let row = weights.row_mut(i);
        for (w, &f) in row.iter_mut().zip(&fft_freqs) {
            let lower = (f - mel_f[i]) / fdiff[i];
            let upper = (mel_f[i + 2] - f) / fdiff[i + 1];
            *w = lower.min(upper).max(0.0) * norm;
        }
        if row.iter().all(|&w| w == 0.0) {
            empty_bands += 1;
        }
    }

    if empty_bands > 0 {
        warn!(
            "{} of {} mel bands are empty (n_mels={} is high for fft_size={})",
            empty_bands, n_mels, n_mels, fft_size
        );
    }

    Ok(weights)
}

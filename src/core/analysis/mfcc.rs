// src/core/analysis/mfcc.rs
//
// MFCC feature extraction
//
// waveform -> pre-emphasis -> STFT (no centering) -> mel power spectrogram
// -> dB -> DCT along the mel axis -> first n_mfcc rows
// -> optional zeroth coefficient energy/removal -> optional mean normalization

use log::debug;

use crate::config::{MeanNormAxis, MfccConfig, ZerothCoefficient};
use crate::core::dsp::{self, stats, RealFftBackend, SpectralBackend};
use crate::core::matrix::Matrix;
use crate::error::{MfccError, Result};

/// Computes cepstral features from one waveform at a time.
///
/// Holds only a validated configuration and a stateless backend, so a single
/// extractor can be shared between threads.
#[derive(Debug, Clone)]
pub struct FeatureExtractor<B: SpectralBackend = RealFftBackend> {
    config: MfccConfig,
    backend: B,
}

impl FeatureExtractor<RealFftBackend> {
    pub fn new(config: MfccConfig) -> Result<Self> {
        Self::with_backend(config, RealFftBackend)
    }
}

impl<B: SpectralBackend> FeatureExtractor<B> {
    pub fn with_backend(config: MfccConfig, backend: B) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    pub fn config(&self) -> &MfccConfig {
        &self.config
    }

    /// High-pass `[1, -coef]` filter started in steady state
    pub fn pre_emphasize(&self, waveform: &[f64]) -> Vec<f64> {
        dsp::pre_emphasis(waveform, self.config.pre_emphasis)
    }

    /// Per-frame `10 * log10(sum |X|^2)` of `waveform` as given (no pre-emphasis)
    pub fn log_energy(&self, waveform: &[f64]) -> Result<Vec<f64>> {
        self.check_waveform(waveform)?;
        self.energy_db(waveform)
    }

    /// Mel spectrogram `[n_mels × n_frames]` of `waveform` as given
    pub fn mel_spectrogram(&self, waveform: &[f64]) -> Result<Matrix> {
        self.check_waveform(waveform)?;
        self.mel_power(waveform)
    }

    /// Cepstral coefficient matrix `[coefficients × n_frames]`
    pub fn mfcc(&self, waveform: &[f64]) -> Result<Matrix> {
        self.check_waveform(waveform)?;
        let cfg = &self.config;

        let emphasized = self.pre_emphasize(waveform);
        let mel = self.mel_power(&emphasized)?;
        let log_mel = self.backend.power_to_db(&mel, &cfg.decibel);

        let n_frames = log_mel.cols();
        let mut coefs = Matrix::zeros(cfg.n_mfcc, n_frames);
        for frame in 0..n_frames {
            let cepstrum = self
                .backend
                .dct(&log_mel.column(frame), cfg.dct_type, cfg.dct_norm)?;
            if cepstrum.len() < cfg.n_mfcc {
                return Err(MfccError::Backend(format!(
                    "DCT returned {} coefficients, {} requested",
                    cepstrum.len(),
                    cfg.n_mfcc
                )));
            }
            coefs.set_column(frame, &cepstrum[..cfg.n_mfcc]);
        }

        match cfg.zeroth_coefficient {
            ZerothCoefficient::Keep => {}
            ZerothCoefficient::Energy => {
                let energy = self.energy_db(&emphasized)?;
                if energy.len() != n_frames {
                    return Err(MfccError::Backend(format!(
                        "log-energy has {} frames, cepstrum has {}",
                        energy.len(),
                        n_frames
                    )));
                }
                coefs.row_mut(0).copy_from_slice(&energy);
            }
            ZerothCoefficient::Remove => coefs = coefs.without_first_row(),
        }

        if cfg.cepstral_mean_norm {
            cepstral_mean_normalize(&mut coefs, cfg.mean_norm_axis);
        }

        debug!(
            "mfcc: {} samples -> {} coefficients x {} frames",
            waveform.len(),
            coefs.rows(),
            coefs.cols()
        );
        Ok(coefs)
    }

    fn check_waveform(&self, waveform: &[f64]) -> Result<()> {
        if waveform.is_empty() {
            return Err(MfccError::invalid_input("waveform is empty"));
        }
        if waveform.len() < self.config.fft_size {
            return Err(MfccError::invalid_input(format!(
                "waveform has {} samples, fewer than one frame of {}",
                waveform.len(),
                self.config.fft_size
            )));
        }
        if let Some(pos) = waveform.iter().position(|s| !s.is_finite()) {
            return Err(MfccError::invalid_input(format!(
                "waveform has a non-finite sample at index {}",
                pos
            )));
        }
        Ok(())
    }

    fn mel_power(&self, waveform: &[f64]) -> Result<Matrix> {
        let cfg = &self.config;
        let magnitude =
            self.backend
                .stft_magnitude(waveform, cfg.fft_size, cfg.hop_size, cfg.window)?;
        let power = if cfg.power == 1.0 {
            magnitude
        } else {
            magnitude.map(|m| m.powf(cfg.power))
        };
        let basis = self
            .backend
            .mel_filterbank(cfg.sample_rate, cfg.fft_size, &cfg.filterbank)?;
        if basis.cols() != power.rows() {
            return Err(MfccError::Backend(format!(
                "filterbank expects {} bins, spectrogram has {}",
                basis.cols(),
                power.rows()
            )));
        }
        debug!(
            "mel spectrogram: {} bands x {} frames",
            basis.rows(),
            power.cols()
        );
        Ok(basis.matmul(&power))
    }

    fn energy_db(&self, waveform: &[f64]) -> Result<Vec<f64>> {
        let cfg = &self.config;
        let power = self
            .backend
            .stft_magnitude(waveform, cfg.fft_size, cfg.hop_size, cfg.window)?
            .map(|m| m * m);
        Ok(stats::frame_energy_db(&power, cfg.decibel.amin))
    }
}

/// Subtract the mean along `axis` in place.
///
/// `Time` removes each coefficient's average over frames (channel
/// normalization). `Coefficient` removes each frame's average over its
/// coefficients instead.
pub fn cepstral_mean_normalize(coefs: &mut Matrix, axis: MeanNormAxis) {
    match axis {
        MeanNormAxis::Time => {
            let means = coefs.row_means();
            for (r, mean) in means.into_iter().enumerate() {
                coefs.row_mut(r).iter_mut().for_each(|v| *v -= mean);
            }
        }
        MeanNormAxis::Coefficient => {
            let means = coefs.column_means();
            for r in 0..coefs.rows() {
                for (v, mean) in coefs.row_mut(r).iter_mut().zip(&means) {
                    *v -= mean;
                }
            }
        }
    }
}

/// Pre-emphasis with the default 0.97 coefficient
pub fn pre_emphasize(waveform: &[f64]) -> Vec<f64> {
    dsp::pre_emphasis(waveform, MfccConfig::default().pre_emphasis)
}

/// Per-frame log-energy in dB with a Hann window
pub fn log_energy(waveform: &[f64], fft_size: usize, hop_size: usize) -> Result<Vec<f64>> {
    let config = MfccConfig::builder()
        .fft_size(fft_size)
        .hop_size(hop_size)
        .build()?;
    FeatureExtractor::new(config)?.log_energy(waveform)
}

/// Mel spectrogram with the default backend
pub fn mel_spectrogram(waveform: &[f64], config: &MfccConfig) -> Result<Matrix> {
    FeatureExtractor::new(config.clone())?.mel_spectrogram(waveform)
}

/// MFCCs with the default backend
pub fn mfcc(waveform: &[f64], config: &MfccConfig) -> Result<Matrix> {
    FeatureExtractor::new(config.clone())?.mfcc(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DctNorm, DctType};
    use std::f64::consts::PI;

    fn sine(freq: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / 16000.0).sin())
            .collect()
    }

    #[test]
    fn test_default_shape() {
        let coefs = mfcc(&sine(440.0, 16000), &MfccConfig::default()).unwrap();
        assert_eq!(coefs.shape(), (13, 98));
        assert!(coefs.is_finite());
    }

    #[test]
    fn test_exact_one_frame() {
        let coefs = mfcc(&sine(440.0, 400), &MfccConfig::default()).unwrap();
        assert_eq!(coefs.shape(), (13, 1));
    }

    #[test]
    fn test_short_and_empty_rejected() {
        let config = MfccConfig::default();
        assert!(mfcc(&[], &config).unwrap_err().is_invalid_input());
        assert!(mfcc(&vec![0.1; 200], &config).unwrap_err().is_invalid_input());
        assert!(mfcc(&vec![0.1; 399], &config).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut samples = sine(440.0, 1000);
        samples[17] = f64::NAN;
        let err = mfcc(&samples, &MfccConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_remove_drops_first_row() {
        let samples = sine(300.0, 4000);
        let keep = mfcc(&samples, &MfccConfig::default()).unwrap();
        let removed = mfcc(
            &samples,
            &MfccConfig::builder()
                .zeroth_coefficient(ZerothCoefficient::Remove)
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(removed.shape(), (12, keep.cols()));
        assert_eq!(removed, keep.without_first_row());
    }

    #[test]
    fn test_energy_replaces_first_row() {
        let samples = sine(300.0, 4000);
        let config = MfccConfig::builder()
            .zeroth_coefficient(ZerothCoefficient::Energy)
            .build()
            .unwrap();
        let extractor = FeatureExtractor::new(config).unwrap();
        let coefs = extractor.mfcc(&samples).unwrap();
        let energy = extractor
            .log_energy(&extractor.pre_emphasize(&samples))
            .unwrap();
        assert_eq!(coefs.row(0), energy.as_slice());

        let keep = mfcc(&samples, &MfccConfig::default()).unwrap();
        for r in 1..13 {
            assert_eq!(coefs.row(r), keep.row(r));
        }
    }

    #[test]
    fn test_mean_norm_over_time() {
        let samples: Vec<f64> = sine(200.0, 8000)
            .iter()
            .zip(sine(1700.0, 8000))
            .enumerate()
            .map(|(i, (a, b))| a * (i as f64 / 8000.0) + b)
            .collect();
        let config = MfccConfig::builder().cepstral_mean_norm(true).build().unwrap();
        let coefs = mfcc(&samples, &config).unwrap();
        for mean in coefs.row_means() {
            assert!(mean.abs() < 1e-9, "row mean {}", mean);
        }
    }

    #[test]
    fn test_mean_norm_over_coefficients_differs() {
        // Per-frame normalization zeroes column means but not row means
        let samples = sine(523.0, 6000);
        let config = MfccConfig::builder()
            .cepstral_mean_norm(true)
            .mean_norm_axis(MeanNormAxis::Coefficient)
            .build()
            .unwrap();
        let coefs = mfcc(&samples, &config).unwrap();
        for mean in coefs.column_means() {
            assert!(mean.abs() < 1e-9);
        }
        assert!(coefs.row_means().iter().any(|m| m.abs() > 1e-3));
    }

    #[test]
    fn test_deterministic() {
        let samples = sine(880.0, 5000);
        let config = MfccConfig::builder()
            .zeroth_coefficient(ZerothCoefficient::Energy)
            .cepstral_mean_norm(true)
            .build()
            .unwrap();
        let extractor = FeatureExtractor::new(config).unwrap();
        assert_eq!(extractor.mfcc(&samples).unwrap(), extractor.mfcc(&samples).unwrap());
    }

    #[test]
    fn test_mel_spectrogram_shape_and_sign() {
        let mel = mel_spectrogram(&sine(440.0, 2000), &MfccConfig::default()).unwrap();
        assert_eq!(mel.shape(), (128, 11));
        assert!(mel.as_slice().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_log_energy_of_silence_is_floored() {
        let energy = log_energy(&vec![0.0; 800], 400, 160).unwrap();
        assert_eq!(energy.len(), 3);
        assert!(energy.iter().all(|&e| (e + 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_log_energy_louder_is_higher() {
        let quiet = log_energy(&sine(440.0, 800), 400, 160).unwrap();
        let loud: Vec<f64> = sine(440.0, 800).iter().map(|s| s * 10.0).collect();
        let loud = log_energy(&loud, 400, 160).unwrap();
        for (q, l) in quiet.iter().zip(&loud) {
            assert!((l - q - 20.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_dct_type_three_runs() {
        let config = MfccConfig::builder()
            .dct(DctType::Three, DctNorm::None)
            .build()
            .unwrap();
        let coefs = mfcc(&sine(440.0, 1600), &config).unwrap();
        assert_eq!(coefs.shape(), (13, 8));
        assert!(coefs.is_finite());
    }

    #[test]
    fn test_silence_is_finite() {
        let coefs = mfcc(&vec![0.0; 1600], &MfccConfig::default()).unwrap();
        assert!(coefs.is_finite());
    }

    #[test]
    fn test_normalize_helpers() {
        let mut m = Matrix::from_rows(&[vec![1.0, 3.0], vec![10.0, 20.0]]).unwrap();
        cepstral_mean_normalize(&mut m, MeanNormAxis::Time);
        assert_eq!(m.to_rows(), vec![vec![-1.0, 1.0], vec![-5.0, 5.0]]);

        let mut m = Matrix::from_rows(&[vec![1.0, 3.0], vec![10.0, 20.0]]).unwrap();
        cepstral_mean_normalize(&mut m, MeanNormAxis::Coefficient);
        assert_eq!(m.to_rows(), vec![vec![-4.5, -8.5], vec![4.5, 8.5]]);
    }
}

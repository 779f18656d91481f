//! CLI argument parsing

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use super::output::OutputFormat;
use crate::config::{
    DctNorm, DctType, MeanNormAxis, MfccConfig, MfccConfigBuilder, WindowType, ZerothCoefficient,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "mfcc", version)]
#[command(about = "Compute mel-frequency cepstral coefficients from audio files")]
pub struct Args {
    /// Input files or directories
    #[arg(required_unless_present = "print_config")]
    pub inputs: Vec<PathBuf>,

    /// JSON file with analysis parameters (flags below override it)
    #[arg(short, long, env = "MFCC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of cepstral coefficients
    #[arg(long)]
    pub n_mfcc: Option<usize>,

    /// FFT / window length in samples
    #[arg(long)]
    pub fft_size: Option<usize>,

    /// Frame advance in samples
    #[arg(long)]
    pub hop_size: Option<usize>,

    /// Analysis window (hann, hamming, blackman, rectangular)
    #[arg(long, value_parser = parse_window)]
    pub window: Option<WindowType>,

    /// Number of mel bands
    #[arg(long)]
    pub n_mels: Option<usize>,

    /// Lowest mel band edge in Hz
    #[arg(long)]
    pub fmin: Option<f64>,

    /// Highest mel band edge in Hz (default: Nyquist)
    #[arg(long)]
    pub fmax: Option<f64>,

    /// DCT type (1, 2 or 3)
    #[arg(long, value_parser = parse_dct_type)]
    pub dct_type: Option<DctType>,

    /// DCT normalization (none, ortho)
    #[arg(long, value_parser = parse_dct_norm)]
    pub dct_norm: Option<DctNorm>,

    /// Zeroth coefficient policy (keep, energy, remove)
    #[arg(long, value_parser = parse_zeroth)]
    pub zeroth: Option<ZerothCoefficient>,

    /// Enable cepstral mean normalization
    #[arg(long, conflicts_with = "no_cmn")]
    pub cmn: bool,

    /// Disable cepstral mean normalization, even if the config file enables it
    #[arg(long)]
    pub no_cmn: bool,

    /// Axis for cepstral mean normalization (time, coefficient)
    #[arg(long, value_parser = parse_axis)]
    pub cmn_axis: Option<MeanNormAxis>,

    /// Dynamic range kept below the peak of the log-mel spectrogram
    #[arg(long, conflicts_with = "no_top_db")]
    pub top_db: Option<f64>,

    /// Keep the full dynamic range of the log-mel spectrogram
    #[arg(long)]
    pub no_top_db: bool,

    /// Pre-emphasis coefficient
    #[arg(long)]
    pub pre_emphasis: Option<f64>,

    /// Expected input sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Analyze each file at its own sample rate instead of rejecting mismatches
    #[arg(long)]
    pub use_file_rate: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write one `<stem>.mfcc.<ext>` per input here instead of stdout
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Effective configuration: defaults, then the config file, then flags
    pub fn to_config(&self) -> Result<MfccConfig> {
        let base = match &self.config {
            Some(path) => MfccConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => MfccConfig::default(),
        };

        let mut builder = MfccConfigBuilder::from_config(base.clone());
        if let Some(n) = self.n_mfcc {
            builder = builder.n_mfcc(n);
        }
        if let Some(n) = self.fft_size {
            builder = builder.fft_size(n);
        }
        if let Some(n) = self.hop_size {
            builder = builder.hop_size(n);
        }
        if let Some(window) = self.window {
            builder = builder.window(window);
        }
        if let Some(n) = self.n_mels {
            builder = builder.n_mels(n);
        }
        if self.fmin.is_some() || self.fmax.is_some() {
            builder = builder.freq_range(
                self.fmin.unwrap_or(base.filterbank.fmin),
                self.fmax.or(base.filterbank.fmax),
            );
        }
        if self.dct_type.is_some() || self.dct_norm.is_some() {
            builder = builder.dct(
                self.dct_type.unwrap_or(base.dct_type),
                self.dct_norm.unwrap_or(base.dct_norm),
            );
        }
        if let Some(policy) = self.zeroth {
            builder = builder.zeroth_coefficient(policy);
        }
        if self.no_cmn {
            builder = builder.cepstral_mean_norm(false);
        } else if self.cmn {
            builder = builder.cepstral_mean_norm(true);
        }
        if let Some(axis) = self.cmn_axis {
            builder = builder.mean_norm_axis(axis);
        }
        if self.no_top_db {
            builder = builder.top_db(None);
        } else if let Some(top_db) = self.top_db {
            builder = builder.top_db(Some(top_db));
        }
        if let Some(coef) = self.pre_emphasis {
            builder = builder.pre_emphasis(coef);
        }
        if let Some(rate) = self.sample_rate {
            builder = builder.sample_rate(rate);
        }

        builder.build().context("Invalid analysis parameters")
    }
}

fn parse_dct_type(value: &str) -> std::result::Result<DctType, String> {
    let n: u8 = value
        .parse()
        .map_err(|_| format!("Invalid DCT type: {}", value))?;
    DctType::try_from(n).map_err(|e| e.to_string())
}

fn parse_window(value: &str) -> std::result::Result<WindowType, String> {
    WindowType::from_name(value).ok_or_else(|| format!("Unknown window: {}", value))
}

fn parse_dct_norm(value: &str) -> std::result::Result<DctNorm, String> {
    DctNorm::from_name(value).ok_or_else(|| format!("Unknown DCT normalization: {}", value))
}

fn parse_zeroth(value: &str) -> std::result::Result<ZerothCoefficient, String> {
    ZerothCoefficient::from_name(value)
        .ok_or_else(|| format!("Unknown zeroth coefficient policy: {}", value))
}

fn parse_axis(value: &str) -> std::result::Result<MeanNormAxis, String> {
    match value.to_lowercase().as_str() {
        "time" | "frames" => Ok(MeanNormAxis::Time),
        "coefficient" | "coefficients" => Ok(MeanNormAxis::Coefficient),
        _ => Err(format!("Unknown normalization axis: {}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mfcc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_library() {
        let args = parse(&["speech.wav"]);
        assert_eq!(args.to_config().unwrap(), MfccConfig::default());
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_flag_overrides() {
        let args = parse(&[
            "--n-mfcc", "20", "--n-mels", "40", "--zeroth", "energy", "--cmn",
            "--cmn-axis", "coefficient", "--dct-type", "3", "--no-top-db", "a.wav",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.n_mfcc, 20);
        assert_eq!(config.filterbank.n_mels, 40);
        assert_eq!(config.zeroth_coefficient, ZerothCoefficient::Energy);
        assert!(config.cepstral_mean_norm);
        assert_eq!(config.mean_norm_axis, MeanNormAxis::Coefficient);
        assert_eq!(config.dct_type, DctType::Three);
        assert_eq!(config.dct_norm, DctNorm::Ortho);
        assert_eq!(config.decibel.top_db, None);
    }

    #[test]
    fn test_invalid_combination_reported() {
        let args = parse(&["--dct-type", "1", "a.wav"]);
        assert!(args.to_config().is_err());

        let args = parse(&["--dct-type", "1", "--dct-norm", "none", "a.wav"]);
        assert!(args.to_config().is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::try_parse_from(["mfcc", "--dct-type", "5", "a.wav"]).is_err());
        assert!(Args::try_parse_from(["mfcc", "--zeroth", "first", "a.wav"]).is_err());
        assert!(Args::try_parse_from(["mfcc", "--top-db", "60", "--no-top-db", "a.wav"]).is_err());
        assert!(Args::try_parse_from(["mfcc"]).is_err());
        assert!(Args::try_parse_from(["mfcc", "--print-config"]).is_ok());
    }

    #[test]
    fn test_window_flag() {
        let config = parse(&["--window", "Hamming", "a.wav"]).to_config().unwrap();
        assert_eq!(config.window, WindowType::Hamming);
        assert!(Args::try_parse_from(["mfcc", "--window", "kaiser", "a.wav"]).is_err());
    }

    #[test]
    fn test_no_cmn_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("cmn-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{ "cepstral_mean_norm": true }"#).unwrap();
        let config_arg = path.to_str().unwrap();

        let from_file = parse(&["--config", config_arg, "a.wav"]).to_config().unwrap();
        let disabled = parse(&["--config", config_arg, "--no-cmn", "a.wav"])
            .to_config()
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert!(from_file.cepstral_mean_norm);
        assert!(!disabled.cepstral_mean_norm);
        assert!(Args::try_parse_from(["mfcc", "--cmn", "--no-cmn", "a.wav"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(parse(&["-vv", "a.wav"]).verbose, 2);
    }
}

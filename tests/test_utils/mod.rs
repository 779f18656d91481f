// tests/test_utils/mod.rs
//
// Shared helpers for the integration tests: synthetic signals, WAV fixtures
// and access to the built binary.
#![allow(dead_code)]

use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use uuid::Uuid;

pub const SAMPLE_RATE: u32 = 16000;

pub fn sine(freq: f64, amplitude: f64, len: usize, sample_rate: u32) -> Vec<f64> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin())
        .collect()
}

/// Deterministic pseudo-random noise in [-amplitude, amplitude]
pub fn noise(amplitude: f64, len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}

/// Fresh directory under the system temp dir
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

/// Write mono 16-bit PCM
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
        writer.write_sample(v).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

pub fn run_mfcc<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_mfcc"))
        .args(args)
        .env_remove("MFCC_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute mfcc binary")
}

// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::Args;
pub use output::{output_path, print_summary, render, render_all, FeatureReport, OutputFormat};

use anyhow::{bail, Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::MfccConfig;
use crate::core::analysis::FeatureExtractor;
use crate::core::decoder::{decode_audio, extract_mono, is_audio_file};

/// Outcome of a CLI run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Install the logger. `-v` raises the level; `RUST_LOG` takes precedence.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_string().to_lowercase()),
    )
    .format_timestamp(None)
    .init();
}

/// Run the CLI
pub fn run(args: &Args) -> Result<RunSummary> {
    let config = args.to_config()?;

    if args.print_config {
        println!("{}", config.to_json_pretty());
        return Ok(RunSummary::default());
    }

    let files = collect_audio_files(&args.inputs)?;
    if files.is_empty() {
        bail!("No audio files found");
    }
    info!("Found {} audio file(s)", files.len());

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    info!(
        "Extracting {} coefficient(s) per frame ({} / {} samples)",
        config.output_coefficients(),
        config.fft_size,
        config.hop_size
    );
    let extractor = FeatureExtractor::new(config)?;

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = args.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build().context("Failed to start worker threads")?;

    let progress = if args.output_dir.is_some() && files.len() > 1 {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} files ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results: Vec<Result<FeatureReport>> = pool.install(|| {
        files
            .par_iter()
            .progress_with(progress.clone())
            .map(|path| {
                let report = process_file(path, &extractor, args.use_file_rate)?;
                if let Some(dir) = &args.output_dir {
                    let target = output_path(dir, path, args.format);
                    std::fs::write(&target, render(&report, args.format)?)
                        .with_context(|| format!("Failed to write {}", target.display()))?;
                }
                Ok(report)
            })
            .collect()
    });
    progress.finish_and_clear();

    let mut reports = Vec::new();
    let mut entries = Vec::with_capacity(files.len());
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(report) => {
                entries.push((path.clone(), Ok((report.n_coefficients, report.n_frames))));
                reports.push(report);
            }
            Err(e) => {
                warn!("{}: {:#}", path.display(), e);
                entries.push((path.clone(), Err(format!("{:#}", e))));
            }
        }
    }

    let multi = files.len() > 1;
    if args.output_dir.is_none() && (multi || !reports.is_empty()) {
        print!("{}", render_all(&reports, args.format, multi)?);
    }
    print_summary(&entries);

    Ok(RunSummary {
        processed: reports.len(),
        failed: entries.len() - reports.len(),
    })
}

/// Decode one file and extract its features
pub fn process_file(
    path: &Path,
    extractor: &FeatureExtractor,
    use_file_rate: bool,
) -> Result<FeatureReport> {
    let audio = decode_audio(path)?;
    let expected = extractor.config().sample_rate;

    let extractor = if audio.sample_rate == expected {
        Cow::Borrowed(extractor)
    } else if use_file_rate {
        let config = MfccConfig {
            sample_rate: audio.sample_rate,
            ..extractor.config().clone()
        };
        Cow::Owned(FeatureExtractor::new(config).with_context(|| {
            format!("Parameters do not fit a {} Hz file", audio.sample_rate)
        })?)
    } else {
        bail!(
            "sample rate is {} Hz but {} Hz is expected (resample first or pass --use-file-rate)",
            audio.sample_rate,
            expected
        );
    };

    let mono = extract_mono(&audio);
    let coefs = extractor
        .mfcc(&mono)
        .with_context(|| format!("Feature extraction failed for {}", path.display()))?;

    Ok(FeatureReport::new(path, audio.sample_rate, &coefs))
}

/// Expand directories into the audio files they contain, keeping the order
/// given on the command line
pub fn collect_audio_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    Ok(files)
}

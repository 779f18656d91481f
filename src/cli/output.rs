//! Output formatting for CLI results

use anyhow::Result;
use clap::ValueEnum;
use colorful::Colorful;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::core::matrix::Matrix;

/// Serialization format for coefficient matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Object with metadata and coefficient rows
    Json,
    /// One line per frame, one column per coefficient
    Csv,
    /// Shape header followed by coefficient rows
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Features extracted from one file
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub file: String,
    pub sample_rate: u32,
    pub n_coefficients: usize,
    pub n_frames: usize,
    /// Row `i` holds coefficient `i` for every frame
    pub coefficients: Vec<Vec<f64>>,
}

impl FeatureReport {
    pub fn new(path: &Path, sample_rate: u32, coefs: &Matrix) -> Self {
        Self {
            file: path.display().to_string(),
            sample_rate,
            n_coefficients: coefs.rows(),
            n_frames: coefs.cols(),
            coefficients: coefs.to_rows(),
        }
    }
}

/// Render one report
pub fn render(report: &FeatureReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => Ok(render_csv(report)),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

/// Render reports for stdout. `multi` is set when more than one input was
/// given: JSON is then always an array, even if only one file succeeded, and
/// CSV blocks are prefixed with the file name. Other formats are concatenated.
pub fn render_all(reports: &[FeatureReport], format: OutputFormat, multi: bool) -> Result<String> {
    if format == OutputFormat::Json && multi {
        return Ok(serde_json::to_string_pretty(reports)? + "\n");
    }
    let mut out = String::new();
    for report in reports {
        if format == OutputFormat::Csv && multi {
            let _ = writeln!(out, "# {}", report.file);
        }
        out.push_str(&render(report, format)?);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}

fn render_csv(report: &FeatureReport) -> String {
    let mut out = String::new();
    let header: Vec<String> = (0..report.n_coefficients).map(|i| format!("c{}", i)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for frame in 0..report.n_frames {
        let line: Vec<String> = report
            .coefficients
            .iter()
            .map(|row| row[frame].to_string())
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn render_text(report: &FeatureReport) -> String {
    let mut out = format!(
        "{} ({} Hz): {} coefficients x {} frames\n",
        report.file, report.sample_rate, report.n_coefficients, report.n_frames
    );
    for (i, row) in report.coefficients.iter().enumerate() {
        let values: Vec<String> = row.iter().map(|v| format!("{:9.3}", v)).collect();
        let _ = writeln!(out, "c{:<3}{}", i, values.join(" "));
    }
    out
}

/// `<dir>/<stem>.mfcc.<ext>`
pub fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dir.join(format!("{}.mfcc.{}", stem, format.extension()))
}

/// One status line per file on stderr, then totals
pub fn print_summary(entries: &[(PathBuf, std::result::Result<(usize, usize), String>)]) {
    let mut failed = 0;
    for (path, outcome) in entries {
        match outcome {
            Ok((rows, cols)) => eprintln!(
                "{} {} ({} x {})",
                "✓".green(),
                path.display().to_string().cyan(),
                rows,
                cols
            ),
            Err(message) => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red(), path.display(), message.clone().yellow());
            }
        }
    }

    let processed = entries.len() - failed;
    if failed == 0 {
        eprintln!("{}", format!("Processed {} file(s)", processed).green());
    } else {
        eprintln!(
            "{}",
            format!("Processed {} file(s), {} failed", processed, failed).red()
        );
    }
}

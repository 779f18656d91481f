// src/main.rs
use anyhow::Result;
use clap::Parser;

use mfcc_extract::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let summary = cli::run(&args)?;
    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

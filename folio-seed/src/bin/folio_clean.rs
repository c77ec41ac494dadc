//! folio-clean: raw catalog exports → cleaned JSON artifact
//!
//! Reads every configured `[[sources]]` file in order, drops repeated
//! (title, author) pairs, normalizes categories and prices, and writes the
//! artifact the seed stage consumes. Touches no database.

use anyhow::{Context, Result};
use clap::Parser;
use folio_common::config::SourceConfig;
use folio_seed::catalog::PricePolicy;
use folio_seed::cli::{make_rng, parse_source_arg, CommonArgs};
use folio_seed::stages::run_clean_stage;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "folio-clean")]
#[command(about = "Clean and de-duplicate raw book exports")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Source file as PATH:FORMAT, FORMAT being pipe or comma; repeatable,
    /// read in the order given (replaces configured sources)
    #[arg(long = "source", value_name = "PATH:FORMAT", value_parser = parse_source_arg)]
    sources: Vec<SourceConfig>,

    /// Output artifact path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for price synthesis
    #[arg(long)]
    rng_seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let boot = args.common.bootstrap("folio-clean")?;
    let config = boot.config;

    let sources = if args.sources.is_empty() {
        config.sources.clone()
    } else {
        args.sources
    };

    let artifact = args.output.unwrap_or_else(|| config.artifact_path());
    let policy = PricePolicy::from_config(&config.pricing)?;
    let mut rng = make_rng(args.rng_seed.or(config.seed.rng_seed));

    let report = run_clean_stage(&sources, &artifact, &policy, &mut rng)
        .context("Clean stage failed")?;

    info!(
        records = report.records_read,
        duplicates = report.duplicates,
        books = report.books_written,
        artifact = %report.artifact.display(),
        "Clean complete"
    );
    Ok(())
}

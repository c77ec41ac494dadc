//! folio-seed: cleaned JSON artifact → storefront database
//!
//! Upserts the category taxonomy, then inserts every artifact book with
//! storefront defaults filled in. Cover lookup against Google Books runs
//! only when `[covers] enabled = true`.

use anyhow::{Context, Result};
use clap::Parser;
use folio_common::db::with_store;
use folio_seed::cli::{make_rng, CommonArgs};
use folio_seed::services::{CoverLookup, GoogleBooksClient, NoCoverLookup};
use folio_seed::stages::{run_seed_stage, SeedOptions};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "folio-seed")]
#[command(about = "Seed the bookstore catalog from the cleaned artifact")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Artifact to read (defaults to the configured path)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Keep existing books, reviews and cart items
    #[arg(long)]
    keep_existing: bool,

    /// Look up missing covers even if disabled in config
    #[arg(long)]
    covers: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let boot = args.common.bootstrap("folio-seed")?;
    let config = boot.config;

    let artifact = args.input.unwrap_or_else(|| config.artifact_path());

    let mut options = SeedOptions::from_config(&config.seed)?;
    if args.keep_existing {
        options.clear_existing = false;
    }

    let covers: Box<dyn CoverLookup> = if args.covers || config.covers.enabled {
        Box::new(
            GoogleBooksClient::new(config.covers.api_key.clone(), config.covers.requests_per_second)
                .context("Failed to build cover lookup client")?,
        )
    } else {
        Box::new(NoCoverLookup)
    };
    info!(source = covers.source_id(), "Cover lookup");

    let mut rng = make_rng(config.seed.rng_seed);

    let report = with_store(&boot.database_url, |store| async move {
        run_seed_stage(&store, &artifact, covers.as_ref(), &options, &mut rng).await
    })
    .await
    .context("Seed stage failed")?;

    info!(
        books = report.inserted,
        categories = report.categories,
        "Seed complete"
    );
    Ok(())
}

//! folio-reviews: synthetic users and reviews for the stored catalog
//!
//! Removes persisted duplicate books first, then gives every remaining book
//! a rating-weighted review set drawn from a shared user pool.

use anyhow::{Context, Result};
use clap::Parser;
use folio_common::db::with_store;
use folio_seed::cli::{make_rng, CommonArgs};
use folio_seed::reviews::{ReviewGenerator, ReviewSettings};
use folio_seed::stages::run_review_stage;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "folio-reviews")]
#[command(about = "Generate synthetic reviews for the seeded catalog")]
#[command(version)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of synthetic users
    #[arg(long)]
    users: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let boot = args.common.bootstrap("folio-reviews")?;
    let config = boot.config;

    let mut settings = ReviewSettings::from_config(&config.reviews)?;
    if let Some(users) = args.users {
        settings.user_pool_size = users;
    }
    let progress_every = config.reviews.progress_every;
    let rng = make_rng(args.rng_seed.or(config.reviews.rng_seed));
    let mut generator = ReviewGenerator::new(rng, settings);

    let report = with_store(&boot.database_url, |store| async move {
        run_review_stage(&store, &mut generator, progress_every).await
    })
    .await
    .context("Review stage failed")?;

    info!(
        duplicates_removed = report.duplicates_removed,
        users = report.users,
        books = report.books,
        reviews = report.reviews,
        average_per_book = report.average_per_book(),
        "Reviews complete"
    );
    Ok(())
}

//! Seed stage: JSON artifact → categories and books in the store
//!
//! Books are inserted in small batches with a pause between them so an
//! enabled cover lookup stays polite. Cover problems only cost the cover;
//! any storage error aborts the run.

use crate::catalog::{read_artifact, Category, CleanedBook};
use crate::db::{clear_catalog, insert_book, upsert_taxonomy, ClearedCounts, NewBook};
use crate::error::{SeedError, SeedResult};
use crate::services::CoverLookup;
use chrono::NaiveDate;
use folio_common::config::SeedConfig;
use folio_common::Store;
use rand::Rng;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Log a line every this many inserted books
const PROGRESS_EVERY: usize = 10;

const ISBN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FEATURED_PROBABILITY: f64 = 0.2;

/// Validated `[seed]` settings
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOptions {
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub clear_existing: bool,
    pub publisher: String,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay: Duration::from_millis(50),
            clear_existing: true,
            publisher: "Solson Publications".to_string(),
        }
    }
}

impl SeedOptions {
    pub fn from_config(config: &SeedConfig) -> SeedResult<Self> {
        if config.batch_size == 0 {
            return Err(SeedError::Config("seed.batch_size must be at least 1".to_string()));
        }

        Ok(Self {
            batch_size: config.batch_size,
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            clear_existing: config.clear_existing,
            publisher: config.publisher.clone(),
        })
    }
}

/// Outcome of a seed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// Rows removed before seeding, when clearing was enabled
    pub cleared: Option<ClearedCounts>,
    pub categories: usize,
    pub inserted: usize,
    pub covers_from_artifact: usize,
    pub covers_looked_up: usize,
    pub without_cover: usize,
}

/// Read the artifact at `artifact` and seed its books
pub async fn run_seed_stage<R: Rng + ?Sized>(
    store: &Store,
    artifact: &Path,
    covers: &dyn CoverLookup,
    options: &SeedOptions,
    rng: &mut R,
) -> SeedResult<SeedReport> {
    let books = read_artifact(artifact)?;
    info!(books = books.len(), path = %artifact.display(), "Artifact loaded");
    seed_books(store, &books, covers, options, rng).await
}

/// Seed already-loaded books
pub async fn seed_books<R: Rng + ?Sized>(
    store: &Store,
    books: &[CleanedBook],
    covers: &dyn CoverLookup,
    options: &SeedOptions,
    rng: &mut R,
) -> SeedResult<SeedReport> {
    let pool = store.pool();
    let mut report = SeedReport::default();

    if options.clear_existing {
        report.cleared = Some(clear_catalog(pool).await?);
    }

    let category_ids = upsert_taxonomy(pool).await?;
    report.categories = category_ids.len();

    let batch_size = options.batch_size.max(1);
    let batch_count = books.len().div_ceil(batch_size);

    for (batch_index, batch) in books.chunks(batch_size).enumerate() {
        for book in batch {
            let cover = resolve_cover(book, covers, &mut report).await;
            let category_id = category_ids
                .get(&book.category)
                .cloned()
                .ok_or_else(|| {
                    SeedError::Config(format!("Category {} was not upserted", book.category))
                })?;

            let row = enrich(book, category_id, cover, &options.publisher, rng);
            insert_book(pool, &row).await?;
            report.inserted += 1;

            if report.inserted % PROGRESS_EVERY == 0 {
                info!(inserted = report.inserted, total = books.len(), "Seeding books");
            }
        }

        debug!(batch = batch_index + 1, batches = batch_count, "Batch complete");
        if batch_index + 1 < batch_count && !options.batch_delay.is_zero() {
            tokio::time::sleep(options.batch_delay).await;
        }
    }

    info!(
        inserted = report.inserted,
        covers_from_artifact = report.covers_from_artifact,
        covers_looked_up = report.covers_looked_up,
        without_cover = report.without_cover,
        "Seeding complete"
    );
    Ok(report)
}

/// Artifact cover, then lookup, then nothing
async fn resolve_cover(
    book: &CleanedBook,
    covers: &dyn CoverLookup,
    report: &mut SeedReport,
) -> Option<String> {
    let existing = book.cover_image.trim();
    if !existing.is_empty() {
        report.covers_from_artifact += 1;
        return Some(existing.to_string());
    }

    match covers.find_cover(&book.title, &book.author).await {
        Some(url) => {
            debug!(title = %book.title, source = covers.source_id(), "Cover found");
            report.covers_looked_up += 1;
            Some(url)
        }
        None => {
            report.without_cover += 1;
            None
        }
    }
}

/// Fill the storefront-only fields of a cleaned book
pub fn enrich<R: Rng + ?Sized>(
    book: &CleanedBook,
    category_id: String,
    cover_image: Option<String>,
    publisher: &str,
    rng: &mut R,
) -> NewBook {
    let description = if book.description.trim().is_empty() {
        default_description(book.category)
    } else {
        book.description.clone()
    };

    let isbn = if book.isbn.trim().is_empty() {
        synthetic_isbn(rng)
    } else {
        book.isbn.clone()
    };

    NewBook {
        title: book.title.clone(),
        author: book.author.clone(),
        description,
        isbn,
        price: book.price,
        cover_image,
        format: "PDF".to_string(),
        language: "English".to_string(),
        publisher: publisher.to_string(),
        publish_date: random_publish_date(rng),
        page_count: rng.gen_range(150..550),
        featured: rng.gen_bool(FEATURED_PROBABILITY),
        category_id,
    }
}

pub fn default_description(category: Category) -> String {
    format!("A comprehensive book on {}.", category.as_str().to_lowercase())
}

/// `978-` followed by nine base-36 characters
pub fn synthetic_isbn<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..9)
        .map(|_| ISBN_ALPHABET[rng.gen_range(0..ISBN_ALPHABET.len())] as char)
        .collect();
    format!("978-{}", suffix)
}

/// A date in 2020..=2024, day of month 1..=28
pub fn random_publish_date<R: Rng + ?Sized>(rng: &mut R) -> NaiveDate {
    let year = rng.gen_range(2020..=2024);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

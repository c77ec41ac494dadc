//! Clean stage: raw exports → de-duplicated, normalized JSON artifact

use crate::catalog::{
    clean_catalog, read_records, write_artifact, Category, PricePolicy, SourceFormat,
};
use crate::error::{SeedError, SeedResult};
use folio_common::config::SourceConfig;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Outcome of a clean run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    /// Valid records read across all sources
    pub records_read: usize,
    /// Later repeats dropped by canonical key
    pub duplicates: usize,
    pub books_written: usize,
    /// Books per category, in taxonomy order; empty categories omitted
    pub categories: Vec<(Category, usize)>,
    pub artifact: PathBuf,
}

/// Read every source in order, clean the combined catalog, write the artifact
///
/// De-duplication spans sources: a book in the second file that repeats one
/// from the first is dropped.
pub fn run_clean_stage<R: Rng + ?Sized>(
    sources: &[SourceConfig],
    artifact: &Path,
    policy: &PricePolicy,
    rng: &mut R,
) -> SeedResult<CleanReport> {
    if sources.is_empty() {
        return Err(SeedError::Config("No [[sources]] configured".to_string()));
    }

    let mut records = Vec::new();
    for source in sources {
        let format = SourceFormat::from_str(&source.format)?;
        let batch = read_records(&source.path, format)?;
        info!(
            path = %source.path.display(),
            format = %format,
            records = batch.len(),
            "Source read"
        );
        records.extend(batch);
    }

    let records_read = records.len();
    let outcome = clean_catalog(records, policy, rng);
    let duplicates = outcome.dropped_count();
    info!(records = records_read, duplicates, "Catalog de-duplicated");

    write_artifact(artifact, &outcome.kept)?;

    let categories = category_counts(outcome.kept.iter().map(|b| b.category));
    for (category, count) in &categories {
        info!(category = %category, books = count, "Category total");
    }

    Ok(CleanReport {
        records_read,
        duplicates,
        books_written: outcome.kept.len(),
        categories,
        artifact: artifact.to_path_buf(),
    })
}

fn category_counts(categories: impl Iterator<Item = Category>) -> Vec<(Category, usize)> {
    let mut counts = [0usize; Category::ALL.len()];
    for category in categories {
        if let Some(slot) = Category::ALL.iter().position(|c| *c == category) {
            counts[slot] += 1;
        }
    }

    Category::ALL
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(c, n)| (*c, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::read_artifact;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn source(path: PathBuf, format: &str) -> SourceConfig {
        SourceConfig {
            path,
            format: format.to_string(),
        }
    }

    #[test]
    fn test_dedup_spans_sources() {
        let dir = TempDir::new().unwrap();
        let pipe = dir.path().join("books.txt");
        let comma = dir.path().join("books.csv");
        std::fs::write(
            &pipe,
            "title|authors|cover_url|description|tags\n\
             Deep Learning|Ian Goodfellow||A book about ML|technology,ai\n\
             Calculus|Spivak|||mathematics\n",
        )
        .unwrap();
        std::fs::write(
            &comma,
            "title,authors,cover_url,description,tags\n\
             deep learning ,IAN GOODFELLOW,,dup,history\n\
             \"Sapiens, A Brief History\",Yuval Harari,,,history\n",
        )
        .unwrap();
        let artifact = dir.path().join("out").join("books_cleaned.json");
        let mut rng = StdRng::seed_from_u64(1);

        let report = run_clean_stage(
            &[source(pipe, "pipe"), source(comma, "comma")],
            &artifact,
            &PricePolicy::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(report.records_read, 4);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.books_written, 3);
        assert_eq!(
            report.categories,
            vec![
                (Category::Mathematics, 1),
                (Category::Technology, 1),
                (Category::History, 1)
            ]
        );

        let books = read_artifact(&artifact).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[2].title, "Sapiens, A Brief History");
    }

    #[test]
    fn test_missing_source_is_error() {
        let dir = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let err = run_clean_stage(
            &[source(dir.path().join("absent.txt"), "pipe")],
            &dir.path().join("out.json"),
            &PricePolicy::default(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, SeedError::Source { .. }));
    }

    #[test]
    fn test_unknown_format_and_empty_sources() {
        let dir = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let out = dir.path().join("out.json");

        assert!(matches!(
            run_clean_stage(
                &[source(dir.path().join("x"), "tsv")],
                &out,
                &PricePolicy::default(),
                &mut rng
            ),
            Err(SeedError::Config(_))
        ));
        assert!(matches!(
            run_clean_stage(&[], &out, &PricePolicy::default(), &mut rng),
            Err(SeedError::Config(_))
        ));
    }
}

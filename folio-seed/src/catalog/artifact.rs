//! Cleaned JSON artifact shared between the clean and seed stages

use super::cleaner::CleanedBook;
use crate::error::{SeedError, SeedResult};
use std::path::Path;
use tracing::{info, warn};

/// Write books as a pretty-printed JSON array
pub fn write_artifact(path: &Path, books: &[CleanedBook]) -> SeedResult<()> {
    let artifact_error = |message: String| SeedError::Artifact {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| artifact_error(e.to_string()))?;
        }
    }

    let json = serde_json::to_string_pretty(books).map_err(|e| artifact_error(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| artifact_error(e.to_string()))?;

    info!(books = books.len(), path = %path.display(), "Cleaned data written");
    Ok(())
}

/// Read the artifact back
///
/// Entries with a blank title or author are skipped with a warning; a
/// missing or malformed file is an error.
pub fn read_artifact(path: &Path) -> SeedResult<Vec<CleanedBook>> {
    let artifact_error = |message: String| SeedError::Artifact {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| artifact_error(e.to_string()))?;
    let books: Vec<CleanedBook> = serde_json::from_str(&content)
        .map_err(|e| artifact_error(format!("malformed JSON: {}", e)))?;

    let total = books.len();
    let valid: Vec<CleanedBook> = books.into_iter().filter(CleanedBook::is_valid).collect();
    if valid.len() < total {
        warn!(
            skipped = total - valid.len(),
            "Artifact entries without title or author skipped"
        );
    }

    Ok(valid)
}

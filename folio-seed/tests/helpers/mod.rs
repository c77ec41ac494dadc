//! Test helper utilities shared by the folio-seed integration tests

#![allow(dead_code)]

use folio_common::Store;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Pipe-delimited export with one case/whitespace duplicate and one bad row
pub const PIPE_EXPORT: &str = "\
title|authors|cover_url|description|tags|source_url
Deep Learning|Ian Goodfellow|http://x/cover.jpg|A book about ML|technology,ai|http://x
Introduction to Probability|Blitzstein|||mathematics,statistics|http://y
deep learning |IAN GOODFELLOW|||history|http://z
Broken|Row
|Nobody|||science|http://w
The Body|Bill Bryson|||health,medical|http://v
";

/// Comma-delimited export with quoted commas
pub const COMMA_EXPORT: &str = "\
title,authors,cover_url,description,tags
\"Thinking, Fast and Slow\",Daniel Kahneman,,,psychology
Cosmos,Carl Sagan,,\"Space, time, and us\",science
";

/// Temp directory plus a file-backed store inside it
///
/// Keep the `TempDir` alive for the duration of the test.
pub async fn create_test_store() -> (TempDir, Store, String) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("folio_test.db").display());
    let store = Store::connect(&url).await.unwrap();
    (dir, store, url)
}

/// Write `content` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub async fn count(store: &Store, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(store.pool())
        .await
        .unwrap()
}

//! Catalog persistence over the shared SQLite store
//!
//! Schema creation lives in `folio_common::db`; these are the row-level
//! operations the pipeline stages need.

pub mod books;
pub mod categories;
pub mod dedup;
pub mod reviews;
pub mod users;

pub use books::{clear_catalog, find_books, insert_book, ClearedCounts, NewBook, StoredBook};
pub use categories::{find_categories, upsert_category, upsert_taxonomy, CategoryRow};
pub use dedup::remove_persisted_duplicates;
pub use reviews::{insert_reviews, NewReview};
pub use users::{upsert_user, upsert_users};

//! Catalog preparation: read, de-duplicate, normalize
//!
//! Pure transformations over delimited exports. Nothing here touches the
//! database; the stages in [`crate::stages`] wire these to storage.

pub mod artifact;
pub mod cleaner;
pub mod dedup;
pub mod pricing;
pub mod reader;
pub mod taxonomy;

pub use artifact::{read_artifact, write_artifact};
pub use cleaner::{clean_catalog, clean_record, CleanedBook};
pub use dedup::{deduplicate, CanonicalKey, CatalogEntry, DedupOutcome, Deduplicator};
pub use pricing::PricePolicy;
pub use reader::{parse_records, read_records, RawRecord, SourceFormat};
pub use taxonomy::{normalize_tags, Category};

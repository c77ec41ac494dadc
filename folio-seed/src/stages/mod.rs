//! Pipeline stages, one per binary
//!
//! - [`clean`]: sources → artifact (`folio-clean`)
//! - [`seed`]: artifact → categories and books (`folio-seed`)
//! - [`reviews`]: books → users and reviews (`folio-reviews`)

pub mod clean;
pub mod reviews;
pub mod seed;

pub use clean::{run_clean_stage, CleanReport};
pub use reviews::{run_review_stage, ReviewReport};
pub use seed::{run_seed_stage, seed_books, SeedOptions, SeedReport};

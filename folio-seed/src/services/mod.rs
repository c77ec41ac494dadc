//! External services used while seeding

pub mod cover_lookup;

pub use cover_lookup::{CoverLookup, CoverLookupError, GoogleBooksClient, NoCoverLookup};

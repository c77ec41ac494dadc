//! folio-seed: offline catalog pipeline for the Folio bookstore
//!
//! Turns raw bibliographic exports into seed data:
//! parse → de-duplicate → normalize → synthesize reviews.
//!
//! The library holds the pure catalog logic ([`catalog`], [`reviews`]), the
//! row-level persistence ([`db`]), the optional cover lookup ([`services`])
//! and the stage drivers ([`stages`]) used by the `folio-clean`,
//! `folio-seed` and `folio-reviews` binaries.

pub mod catalog;
pub mod cli;
pub mod db;
pub mod error;
pub mod reviews;
pub mod services;
pub mod stages;

pub use crate::error::{SeedError, SeedResult};

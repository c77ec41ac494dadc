//! # Folio Common Library
//!
//! Shared code for the Folio catalog tooling including:
//! - Store handle and relational schema
//! - Configuration loading
//! - Logging initialization
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod logging;

pub use db::Store;
pub use error::{Error, Result};

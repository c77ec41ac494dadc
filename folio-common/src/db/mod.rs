//! Store handle and relational schema

pub mod init;

pub use init::*;

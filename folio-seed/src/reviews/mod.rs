//! Synthetic review corpus
//!
//! Templates and name lists live in [`templates`]; [`generator`] turns them
//! into users and rating-weighted reviews.

pub mod generator;
pub mod templates;

pub use generator::{
    ReviewDraft, ReviewGenerator, ReviewSettings, SyntheticReview, SyntheticUser, RATING_WEIGHTS,
};
pub use templates::templates_for;

//! Synthetic reviewer and review generation
//!
//! All randomness is drawn from the injected `rand::Rng`, so a seeded
//! generator reproduces the same corpus.

use super::templates::{templates_for, FIRST_NAMES, LAST_NAMES};
use crate::error::{SeedError, SeedResult};
use chrono::{DateTime, Duration, Utc};
use folio_common::config::ReviewConfig;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Star rating weights (rating, percent)
pub const RATING_WEIGHTS: [(u8, u32); 5] = [(5, 50), (4, 25), (3, 15), (2, 7), (1, 3)];

const YEAR_MS: i64 = 365 * 24 * 60 * 60 * 1000;

/// A generated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticUser {
    pub email: String,
    pub name: String,
}

/// A generated review, not yet tied to stored ids
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticReview {
    pub rating: u8,
    pub comment: &'static str,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A review plus the index of its author in the user pool
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub reviewer: usize,
    pub review: SyntheticReview,
}

/// Bounds and probabilities for generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSettings {
    pub user_pool_size: usize,
    pub min_reviews: usize,
    pub max_reviews: usize,
    pub verified_probability: f64,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            user_pool_size: 2000,
            min_reviews: 200,
            max_reviews: 1500,
            verified_probability: 0.7,
        }
    }
}

impl ReviewSettings {
    /// Validate the `[reviews]` config table
    pub fn from_config(config: &ReviewConfig) -> SeedResult<Self> {
        if config.min_reviews > config.max_reviews {
            return Err(SeedError::Config(format!(
                "min_reviews ({}) exceeds max_reviews ({})",
                config.min_reviews, config.max_reviews
            )));
        }
        if !(0.0..=1.0).contains(&config.verified_probability) {
            return Err(SeedError::Config(format!(
                "verified_probability must be within [0, 1], got {}",
                config.verified_probability
            )));
        }

        Ok(Self {
            user_pool_size: config.user_pool_size,
            min_reviews: config.min_reviews,
            max_reviews: config.max_reviews,
            verified_probability: config.verified_probability,
        })
    }
}

/// Review corpus generator over an injected random source
pub struct ReviewGenerator<R: Rng> {
    rng: R,
    settings: ReviewSettings,
}

impl<R: Rng> ReviewGenerator<R> {
    pub fn new(rng: R, settings: ReviewSettings) -> Self {
        Self { rng, settings }
    }

    pub fn settings(&self) -> &ReviewSettings {
        &self.settings
    }

    /// Build `size` users with unique emails
    ///
    /// Names may repeat; the trailing index keeps every email distinct.
    pub fn user_pool(&mut self, size: usize) -> Vec<SyntheticUser> {
        (0..size)
            .map(|i| {
                let name = self.random_name();
                let local = name.to_lowercase().replacen(' ', ".", 1);
                let email = format!("{}.{}@example.com", local, i);
                SyntheticUser { email, name }
            })
            .collect()
    }

    fn random_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Reader");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Anonymous");
        format!("{} {}", first, last)
    }

    /// Review count for one book: uniform in `[min, max]`, clamped to the pool
    pub fn draw_review_count(&mut self, pool_size: usize) -> usize {
        let max = self.settings.max_reviews.min(pool_size);
        let min = self.settings.min_reviews.min(max);
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(min..=max)
    }

    /// `count` distinct pool indices, drawn without replacement
    pub fn select_reviewers(&mut self, pool_size: usize, count: usize) -> Vec<usize> {
        let count = count.min(pool_size);
        index::sample(&mut self.rng, pool_size, count).into_vec()
    }

    /// Weighted star rating
    pub fn draw_rating(&mut self) -> u8 {
        let total: u32 = RATING_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);

        for (rating, weight) in RATING_WEIGHTS {
            if roll < weight {
                return rating;
            }
            roll -= weight;
        }

        1
    }

    /// One review with a comment from its rating's template pool
    pub fn draw_review(&mut self, now: DateTime<Utc>) -> SyntheticReview {
        let rating = self.draw_rating();
        let comment = templates_for(rating)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        let verified = self.rng.gen_bool(self.settings.verified_probability);
        let age = Duration::milliseconds(self.rng.gen_range(0..YEAR_MS));

        SyntheticReview {
            rating,
            comment,
            verified,
            created_at: now - age,
        }
    }

    /// Full review set for one book
    pub fn reviews_for_book(&mut self, pool_size: usize, now: DateTime<Utc>) -> Vec<ReviewDraft> {
        let count = self.draw_review_count(pool_size);
        let reviewers = self.select_reviewers(pool_size, count);

        reviewers
            .into_iter()
            .map(|reviewer| ReviewDraft {
                reviewer,
                review: self.draw_review(now),
            })
            .collect()
    }
}

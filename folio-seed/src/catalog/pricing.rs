//! Price synthesis for records that carry no usable price

use super::taxonomy::Category;
use crate::error::{SeedError, SeedResult};
use folio_common::config::PricingConfig;
use rand::Rng;

/// Lowest price the category policy will produce
pub const PRICE_FLOOR: f64 = 9.99;

/// Half-width of the random spread around a category base price
const CATEGORY_SPREAD: f64 = 10.0;

/// How a missing price is synthesized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricePolicy {
    /// Uniform in `[min, max)`, rounded to cents
    Uniform { min: f64, max: f64 },
    /// Category base price ± 10, rounded to cents, floored at 9.99
    ByCategory,
}

impl Default for PricePolicy {
    fn default() -> Self {
        PricePolicy::Uniform { min: 10.0, max: 50.0 }
    }
}

impl PricePolicy {
    /// Build from the `[pricing]` config table
    pub fn from_config(config: &PricingConfig) -> SeedResult<Self> {
        match config.policy.trim().to_lowercase().as_str() {
            "uniform" => {
                if !(config.min.is_finite() && config.max.is_finite())
                    || config.min < 0.0
                    || config.min > config.max
                {
                    return Err(SeedError::Config(format!(
                        "Invalid price range [{}, {}]",
                        config.min, config.max
                    )));
                }
                Ok(PricePolicy::Uniform {
                    min: config.min,
                    max: config.max,
                })
            }
            "by_category" | "category" => Ok(PricePolicy::ByCategory),
            other => Err(SeedError::Config(format!("Unknown pricing policy '{}'", other))),
        }
    }

    /// Draw a price for a book in `category`
    pub fn draw<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> f64 {
        match *self {
            PricePolicy::Uniform { min, max } => {
                if max > min {
                    round_cents(rng.gen_range(min..max))
                } else {
                    round_cents(min)
                }
            }
            PricePolicy::ByCategory => {
                let variation = rng.gen_range(-CATEGORY_SPREAD..CATEGORY_SPREAD);
                round_cents(base_price(category) + variation).max(PRICE_FLOOR)
            }
        }
    }
}

/// List price a category starts from
pub fn base_price(category: Category) -> f64 {
    match category {
        Category::Mathematics => 49.99,
        Category::Business => 39.99,
        Category::Technology => 44.99,
        Category::Health => 34.99,
        Category::Science => 42.99,
        _ => 29.99,
    }
}

/// A price column value, if it parses to a finite non-negative number
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('$');
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .map(round_cents)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Review stage: persisted dedup, user pool, per-book review corpus

use crate::db::{insert_reviews, remove_persisted_duplicates, upsert_users, NewReview};
use crate::error::SeedResult;
use crate::reviews::ReviewGenerator;
use chrono::Utc;
use folio_common::Store;
use rand::Rng;
use tracing::info;

/// Outcome of a review run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewReport {
    pub duplicates_removed: usize,
    pub users: usize,
    pub books: usize,
    pub reviews: u64,
}

impl ReviewReport {
    /// Mean reviews per book; 0 when there are no books
    pub fn average_per_book(&self) -> f64 {
        if self.books == 0 {
            0.0
        } else {
            self.reviews as f64 / self.books as f64
        }
    }
}

/// Generate and store reviews for every surviving book
///
/// Reruns append a fresh corpus; a reviewer who already reviewed a book
/// collides on `(user_id, book_id)` and aborts the run, so clear reviews
/// (or reseed) first.
pub async fn run_review_stage<R: Rng>(
    store: &Store,
    generator: &mut ReviewGenerator<R>,
    progress_every: usize,
) -> SeedResult<ReviewReport> {
    let pool = store.pool();

    let outcome = remove_persisted_duplicates(pool).await?;
    let books = outcome.kept;

    let pool_size = generator.settings().user_pool_size;
    let users = generator.user_pool(pool_size);
    let user_ids = upsert_users(pool, &users).await?;
    info!(users = user_ids.len(), "User pool ready");

    let mut report = ReviewReport {
        duplicates_removed: outcome.dropped.len(),
        users: user_ids.len(),
        books: books.len(),
        reviews: 0,
    };

    let progress_every = progress_every.max(1);
    for (index, book) in books.iter().enumerate() {
        let now = Utc::now();
        let rows: Vec<NewReview> = generator
            .reviews_for_book(user_ids.len(), now)
            .into_iter()
            .map(|draft| NewReview {
                user_id: user_ids[draft.reviewer].clone(),
                book_id: book.id.clone(),
                rating: draft.review.rating,
                comment: draft.review.comment.to_string(),
                verified: draft.review.verified,
                created_at: draft.review.created_at,
            })
            .collect();

        report.reviews += insert_reviews(pool, &rows).await?;

        if (index + 1) % progress_every == 0 {
            info!(
                books = index + 1,
                total = books.len(),
                reviews = report.reviews,
                "Generating reviews"
            );
        }
    }

    info!(
        reviews = report.reviews,
        books = report.books,
        average = report.average_per_book(),
        "Review generation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::ReviewSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_average_per_book() {
        let report = ReviewReport {
            books: 4,
            reviews: 10,
            ..ReviewReport::default()
        };
        assert_eq!(report.average_per_book(), 2.5);
        assert_eq!(ReviewReport::default().average_per_book(), 0.0);
    }

    #[tokio::test]
    async fn test_empty_catalog_creates_users_only() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        let settings = ReviewSettings {
            user_pool_size: 5,
            min_reviews: 1,
            max_reviews: 3,
            ..ReviewSettings::default()
        };
        let mut generator = ReviewGenerator::new(StdRng::seed_from_u64(1), settings);

        let report = run_review_stage(&store, &mut generator, 50).await.unwrap();

        assert_eq!(report.users, 5);
        assert_eq!(report.books, 0);
        assert_eq!(report.reviews, 0);
    }
}

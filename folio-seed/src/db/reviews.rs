//! Review persistence

use super::books::delete_where_in;
use crate::error::SeedResult;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Rows per multi-row INSERT (7 bound values each)
const INSERT_CHUNK: usize = 100;

/// A review ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: String,
    pub book_id: String,
    pub rating: u8,
    pub comment: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert reviews in one transaction; returns the number inserted
///
/// A duplicate (user, book) pair fails the whole batch.
pub async fn insert_reviews(pool: &SqlitePool, reviews: &[NewReview]) -> SeedResult<u64> {
    if reviews.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for chunk in reviews.chunks(INSERT_CHUNK) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO reviews (id, user_id, book_id, rating, comment, verified, created_at) ",
        );
        builder.push_values(chunk, |mut row, review| {
            row.push_bind(Uuid::new_v4().to_string())
                .push_bind(review.user_id.as_str())
                .push_bind(review.book_id.as_str())
                .push_bind(i64::from(review.rating))
                .push_bind(review.comment.as_str())
                .push_bind(review.verified)
                .push_bind(review.created_at);
        });

        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Delete every review of the given books
pub async fn delete_reviews_for_books(
    conn: &mut SqliteConnection,
    book_ids: &[String],
) -> SeedResult<u64> {
    delete_where_in(conn, "reviews", "book_id", book_ids).await
}

pub async fn count_reviews(pool: &SqlitePool) -> SeedResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM reviews").fetch_one(pool).await?;
    Ok(count)
}

pub async fn count_reviews_for_book(pool: &SqlitePool, book_id: &str) -> SeedResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE book_id = ?")
        .bind(book_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

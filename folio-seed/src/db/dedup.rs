//! Duplicate removal against the persisted catalog

use super::books::{delete_books_by_ids, find_books, StoredBook};
use crate::catalog::{deduplicate, DedupOutcome};
use crate::error::SeedResult;
use sqlx::SqlitePool;
use tracing::info;

/// Delete later duplicates of already-stored books
///
/// Books are scanned oldest first, so the earliest copy survives. Reviews of
/// the removed books are deleted before the books, all in one transaction.
/// Returns the surviving books and the ids that were removed.
pub async fn remove_persisted_duplicates(
    pool: &SqlitePool,
) -> SeedResult<DedupOutcome<StoredBook>> {
    let books = find_books(pool).await?;
    let total = books.len();
    let outcome = deduplicate(books);

    if outcome.dropped.is_empty() {
        info!(books = total, "No duplicate books found");
        return Ok(outcome);
    }

    let mut tx = pool.begin().await?;
    let deleted = delete_books_by_ids(&mut tx, &outcome.dropped).await?;
    tx.commit().await?;

    info!(
        duplicates = outcome.dropped_count(),
        deleted,
        remaining = outcome.kept.len(),
        "Removed duplicate books"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::books::{count_books, insert_book, NewBook};
    use crate::db::categories::upsert_category;
    use crate::db::reviews::{count_reviews, insert_reviews, NewReview};
    use crate::db::users::upsert_user;
    use chrono::{NaiveDate, Utc};
    use folio_common::Store;

    async fn add_book(store: &Store, category: &str, title: &str, author: &str) -> String {
        let book = NewBook {
            title: title.to_string(),
            author: author.to_string(),
            description: String::new(),
            isbn: String::new(),
            price: 12.0,
            cover_image: None,
            format: "PDF".to_string(),
            language: "English".to_string(),
            publisher: "P".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2020, 5, 5).unwrap(),
            page_count: 300,
            featured: false,
            category_id: category.to_string(),
        };
        insert_book(store.pool(), &book).await.unwrap()
    }

    #[tokio::test]
    async fn test_earliest_copy_survives_with_reviews_removed() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        let category = upsert_category(store.pool(), "Technology", "").await.unwrap();
        let user = upsert_user(store.pool(), "u.0@example.com", "U").await.unwrap();

        let original = add_book(&store, &category, "Deep Learning", "Ian Goodfellow").await;
        let repeat = add_book(&store, &category, "deep learning ", "IAN GOODFELLOW").await;
        add_book(&store, &category, "Other", "Someone").await;

        insert_reviews(
            store.pool(),
            &[NewReview {
                user_id: user,
                book_id: repeat.clone(),
                rating: 4,
                comment: "Good.".to_string(),
                verified: true,
                created_at: Utc::now(),
            }],
        )
        .await
        .unwrap();

        let outcome = remove_persisted_duplicates(store.pool()).await.unwrap();

        assert_eq!(outcome.dropped, vec![repeat]);
        assert_eq!(outcome.kept[0].id, original);
        assert_eq!(count_books(store.pool()).await.unwrap(), 2);
        assert_eq!(count_reviews(store.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clean_catalog_is_untouched() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        let category = upsert_category(store.pool(), "General", "").await.unwrap();
        add_book(&store, &category, "A", "x").await;
        add_book(&store, &category, "A", "y").await;

        let outcome = remove_persisted_duplicates(store.pool()).await.unwrap();
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.dropped_count(), 0);
    }
}

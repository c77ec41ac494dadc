//! Book persistence

use crate::catalog::{CanonicalKey, CatalogEntry};
use crate::error::SeedResult;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

/// Ids per `IN (...)` list, well under SQLite's bound-parameter limit
pub(crate) const ID_CHUNK: usize = 500;

/// A book ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub isbn: String,
    pub price: f64,
    pub cover_image: Option<String>,
    pub format: String,
    pub language: String,
    pub publisher: String,
    pub publish_date: NaiveDate,
    pub page_count: i64,
    pub featured: bool,
    pub category_id: String,
}

/// A persisted book, as far as de-duplication and review generation need it
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl CatalogEntry for StoredBook {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(&self.title, &self.author)
    }

    fn identifier(&self) -> String {
        self.id.clone()
    }
}

/// Rows removed by [`clear_catalog`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedCounts {
    pub reviews: u64,
    pub cart_items: u64,
    pub order_items: u64,
    pub books: u64,
}

/// Insert one book, returning its new id
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> SeedResult<String> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO books (
            id, title, author, description, isbn, price, cover_image, format,
            language, publisher, publish_date, page_count, featured, category_id,
            created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.description)
    .bind(&book.isbn)
    .bind(book.price)
    .bind(&book.cover_image)
    .bind(&book.format)
    .bind(&book.language)
    .bind(&book.publisher)
    .bind(book.publish_date.format("%Y-%m-%d").to_string())
    .bind(book.page_count)
    .bind(book.featured)
    .bind(&book.category_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// All books, oldest first
///
/// Ties on `created_at` fall back to insertion order.
pub async fn find_books(pool: &SqlitePool) -> SeedResult<Vec<StoredBook>> {
    let rows = sqlx::query(
        "SELECT id, title, author, created_at FROM books ORDER BY created_at, rowid",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| StoredBook {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            created_at: row.get("created_at"),
        })
        .collect())
}

pub async fn count_books(pool: &SqlitePool) -> SeedResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM books").fetch_one(pool).await?;
    Ok(count)
}

/// `DELETE FROM {table} WHERE {column} IN (ids)`, chunked
pub(crate) async fn delete_where_in(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    ids: &[String],
) -> SeedResult<u64> {
    let mut affected = 0;

    for chunk in ids.chunks(ID_CHUNK) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("DELETE FROM {} WHERE {} IN (", table, column));
        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        affected += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(affected)
}

/// Delete books and every row that references them
///
/// Reviews, cart items and order items go first so foreign keys hold.
pub async fn delete_books_by_ids(conn: &mut SqliteConnection, ids: &[String]) -> SeedResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    delete_where_in(conn, "reviews", "book_id", ids).await?;
    delete_where_in(conn, "cart_items", "book_id", ids).await?;
    delete_where_in(conn, "order_items", "book_id", ids).await?;
    delete_where_in(conn, "books", "id", ids).await
}

/// Remove all reviews, cart items, order items and books in one transaction
pub async fn clear_catalog(pool: &SqlitePool) -> SeedResult<ClearedCounts> {
    let mut tx = pool.begin().await?;

    let reviews = sqlx::query("DELETE FROM reviews")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let cart_items = sqlx::query("DELETE FROM cart_items")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let order_items = sqlx::query("DELETE FROM order_items")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let books = sqlx::query("DELETE FROM books")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    let counts = ClearedCounts {
        reviews,
        cart_items,
        order_items,
        books,
    };
    info!(
        reviews = counts.reviews,
        cart_items = counts.cart_items,
        books = counts.books,
        "Cleared existing catalog"
    );
    Ok(counts)
}

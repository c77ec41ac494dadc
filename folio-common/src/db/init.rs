//! Database initialization and the explicit store handle
//!
//! The storefront schema (users, categories, books, reviews, cart items,
//! orders, order items) is created on connect. Every statement is
//! `CREATE ... IF NOT EXISTS`, so connecting to an existing database is safe.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Current schema version recorded in `schema_version`
pub const SCHEMA_VERSION: i64 = 1;

/// Connection to the catalog database
///
/// Constructed explicitly with [`Store::connect`] and released with
/// [`Store::close`]. Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if needed) the database at `url` and ensure the schema
    ///
    /// Only `sqlite:` URLs are accepted; anything else is
    /// [`Error::InvalidInput`] and touches no files.
    pub async fn connect(url: &str) -> Result<Self> {
        if !url.starts_with("sqlite:") {
            return Err(Error::InvalidInput(format!(
                "Unsupported database URL '{}' (expected sqlite:...)",
                url
            )));
        }

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(5000));

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        // Every in-memory connection is its own database, so pin the pool to one
        let max_connections = if in_memory { 1 } else { 5 };

        debug!("Connecting to database: {}", url);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        init_schema(&pool).await?;
        info!("Database ready: {}", url);

        Ok(Self { pool })
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(self) {
        self.pool.close().await;
        debug!("Database connections closed");
    }
}

/// Run `body` with a freshly connected store, closing it afterwards
///
/// The store is closed whether `body` succeeds or fails; the body's result
/// is returned unchanged.
pub async fn with_store<F, Fut, T, E>(url: &str, body: F) -> std::result::Result<T, E>
where
    F: FnOnce(Store) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: From<Error>,
{
    let store = Store::connect(url).await?;
    let result = body(store.clone()).await;
    store.close().await;
    result
}

/// Create all tables and indexes if missing
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_users_table(pool).await?;
    create_categories_table(pool).await?;
    create_books_table(pool).await?;
    create_reviews_table(pool).await?;
    create_cart_items_table(pool).await?;
    create_orders_table(pool).await?;
    create_order_items_table(pool).await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_categories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the books table
///
/// `price` is stored in currency units (REAL); `cover_image` is NULL when
/// no cover could be resolved.
pub async fn create_books_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            description TEXT,
            isbn TEXT,
            price REAL NOT NULL CHECK (price >= 0),
            cover_image TEXT,
            format TEXT NOT NULL DEFAULT 'PDF',
            language TEXT NOT NULL DEFAULT 'English',
            publisher TEXT,
            publish_date TEXT,
            page_count INTEGER,
            featured INTEGER NOT NULL DEFAULT 0,
            category_id TEXT NOT NULL REFERENCES categories(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_category ON books(category_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the reviews table
///
/// One review per (user, book).
pub async fn create_reviews_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            book_id TEXT NOT NULL REFERENCES books(id),
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            comment TEXT,
            verified INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (user_id, book_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_book ON reviews(book_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_cart_items_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            book_id TEXT NOT NULL REFERENCES books(id),
            quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0),
            UNIQUE (user_id, book_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_orders_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            total REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_order_items_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id TEXT PRIMARY KEY,
            order_id TEXT NOT NULL REFERENCES orders(id),
            book_id TEXT NOT NULL REFERENCES books(id),
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            price REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

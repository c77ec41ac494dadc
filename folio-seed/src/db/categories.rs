//! Category persistence

use crate::catalog::Category;
use crate::error::SeedResult;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Stored category row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Insert or update a category by name, returning its id
pub async fn upsert_category(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> SeedResult<String> {
    let id: String = sqlx::query_scalar(
        r#"
        INSERT INTO categories (id, name, description)
        VALUES (?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            description = excluded.description
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Upsert every taxonomy label; returns label → category id
pub async fn upsert_taxonomy(pool: &SqlitePool) -> SeedResult<HashMap<Category, String>> {
    let mut ids = HashMap::with_capacity(Category::ALL.len());

    for category in Category::ALL {
        let id = upsert_category(pool, category.as_str(), category.description()).await?;
        ids.insert(category, id);
    }

    info!(categories = ids.len(), "Categories upserted");
    Ok(ids)
}

/// All categories ordered by name
pub async fn find_categories(pool: &SqlitePool) -> SeedResult<Vec<CategoryRow>> {
    let rows = sqlx::query("SELECT id, name, description FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| CategoryRow {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
        })
        .collect())
}

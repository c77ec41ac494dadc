//! User persistence

use crate::error::SeedResult;
use crate::reviews::SyntheticUser;
use sqlx::SqlitePool;
use uuid::Uuid;

const UPSERT_USER_SQL: &str = r#"
    INSERT INTO users (id, email, name)
    VALUES (?, ?, ?)
    ON CONFLICT(email) DO UPDATE SET
        name = excluded.name
    RETURNING id
"#;

/// Insert or update a user by email, returning the stored id
pub async fn upsert_user(pool: &SqlitePool, email: &str, name: &str) -> SeedResult<String> {
    let id: String = sqlx::query_scalar(UPSERT_USER_SQL)
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(id)
}

/// Upsert a whole pool in one transaction
///
/// Returned ids are positionally aligned with `users`.
pub async fn upsert_users(pool: &SqlitePool, users: &[SyntheticUser]) -> SeedResult<Vec<String>> {
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for user in users {
        let id: String = sqlx::query_scalar(UPSERT_USER_SQL)
            .bind(Uuid::new_v4().to_string())
            .bind(&user.email)
            .bind(&user.name)
            .fetch_one(&mut *tx)
            .await?;
        ids.push(id);
    }

    tx.commit().await?;
    Ok(ids)
}

pub async fn count_users(pool: &SqlitePool) -> SeedResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(pool).await?;
    Ok(count)
}

//! Note store
//!
//! Notes reference their owner one-directionally through `owner_id`.
//! Mutating and deleting queries fuse the ownership check into the
//! statement itself (`WHERE id = $1 AND owner_id = $2`), so a note that
//! exists under another owner is mechanically indistinguishable from a
//! note that does not exist.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub owner_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn list_for_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, title, content, owner_id, created_at, updated_at
        FROM notes
        WHERE owner_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Insert a note; the owner is always the authenticated user
pub async fn create(
    pool: &PgPool,
    owner_id: i64,
    title: &str,
    content: Option<&str>,
) -> Result<Note, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO notes (title, content, owner_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

pub async fn get_owned(
    pool: &PgPool,
    id: i64,
    owner_id: i64,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, title, content, owner_id, created_at, updated_at
        FROM notes
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Overwrite title and content in place; None when absent or not owned
pub async fn update_owned(
    pool: &PgPool,
    id: i64,
    owner_id: i64,
    title: &str,
    content: Option<&str>,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE notes
        SET title = $3,
            content = $4,
            updated_at = now()
        WHERE id = $1 AND owner_id = $2
        RETURNING id, title, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Permanently remove a note, returning the removed row; None when absent
/// or not owned
pub async fn delete_owned(
    pool: &PgPool,
    id: i64,
    owner_id: i64,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as(
        r#"
        DELETE FROM notes
        WHERE id = $1 AND owner_id = $2
        RETURNING id, title, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::project::{ProjectPayload, ProjectRow};

/// Newest first — display order follows fetch order.
pub async fn list_projects(pool: &PgPool, user_id: Uuid) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM projects WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn get_project(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<ProjectRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn count_projects(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn insert_project(
    pool: &PgPool,
    user_id: Uuid,
    payload: &ProjectPayload,
) -> Result<ProjectRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects
            (id, user_id, title, description, tags, image_url, live_url, repo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.tags)
    .bind(&payload.image_url)
    .bind(&payload.live_url)
    .bind(&payload.repo_url)
    .fetch_one(pool)
    .await?;

    info!("Created project {id} for user {user_id}");
    Ok(row)
}

/// Scoped to the owning user; returns None when the row is not theirs.
pub async fn update_project(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    payload: &ProjectPayload,
) -> Result<Option<ProjectRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE projects
        SET title = $3, description = $4, tags = $5, image_url = $6,
            live_url = $7, repo_url = $8, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.tags)
    .bind(&payload.image_url)
    .bind(&payload.live_url)
    .bind(&payload.repo_url)
    .fetch_optional(pool)
    .await
}

pub async fn delete_project(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

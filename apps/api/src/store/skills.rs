use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::skill::{SkillLevel, SkillRow};

pub async fn list_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkillRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM skills WHERE user_id = $1 ORDER BY name ASC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn get_skill(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<SkillRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM skills WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_skill(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    level: SkillLevel,
) -> Result<SkillRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, SkillRow>(
        r#"
        INSERT INTO skills (id, user_id, name, level)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(level.as_str())
    .fetch_one(pool)
    .await?;

    info!("Created skill {id} for user {user_id}");
    Ok(row)
}

pub async fn update_skill(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    name: &str,
    level: SkillLevel,
) -> Result<Option<SkillRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE skills
        SET name = $3, level = $4
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(level.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn delete_skill(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

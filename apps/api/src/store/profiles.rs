use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{ProfileRow, SocialLinks};

/// Fields written on profile create/update. Subscription and theme fields
/// have their own operations and are not touched by a profile save.
pub struct ProfileWrite<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub bio: &'a str,
    pub avatar_url: Option<&'a str>,
    pub social_links: &'a SocialLinks,
    pub username: &'a str,
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_profile_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM profiles WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Creates the single profile row for a user. New profiles start on the
/// free plan with the default theme.
pub async fn insert_profile(
    pool: &PgPool,
    user_id: Uuid,
    write: ProfileWrite<'_>,
    theme: &str,
) -> Result<ProfileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles
            (id, name, role, bio, avatar_url, social_links, theme, username,
             subscription_plan, subscription_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'free', 'active')
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(write.name)
    .bind(write.role)
    .bind(write.bio)
    .bind(write.avatar_url)
    .bind(Json(write.social_links))
    .bind(theme)
    .bind(write.username)
    .fetch_one(pool)
    .await?;

    info!("Created profile for user {user_id}");
    Ok(row)
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    write: ProfileWrite<'_>,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE profiles
        SET name = $2, role = $3, bio = $4, avatar_url = $5,
            social_links = $6, username = $7, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(write.name)
    .bind(write.role)
    .bind(write.bio)
    .bind(write.avatar_url)
    .bind(Json(write.social_links))
    .bind(write.username)
    .fetch_optional(pool)
    .await
}

pub async fn update_theme(
    pool: &PgPool,
    user_id: Uuid,
    theme: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE profiles SET theme = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(theme)
    .fetch_optional(pool)
    .await
}

pub async fn update_subscription(
    pool: &PgPool,
    user_id: Uuid,
    plan: &str,
    status: &str,
    ends_at: Option<DateTime<Utc>>,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE profiles
        SET subscription_plan = $2, subscription_status = $3,
            subscription_ends_at = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(plan)
    .bind(status)
    .bind(ends_at)
    .fetch_optional(pool)
    .await
}

pub async fn delete_profile(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

//! Public portfolio view — the unauthenticated, username-keyed read that
//! theme templates render against. Subscription fields stay private.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sqlx::types::Json as SqlJson;

use crate::errors::AppError;
use crate::models::profile::{ProfileRow, SocialLinks};
use crate::models::project::ProjectRow;
use crate::models::skill::SkillRow;
use crate::state::AppState;
use crate::store::{profiles, projects, skills};

#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub social_links: SqlJson<SocialLinks>,
    pub theme: String,
    pub username: String,
}

impl From<ProfileRow> for PublicProfile {
    fn from(row: ProfileRow) -> Self {
        PublicProfile {
            name: row.name,
            role: row.role,
            bio: row.bio,
            avatar_url: row.avatar_url,
            social_links: row.social_links,
            theme: row.theme,
            username: row.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicPortfolio {
    pub profile: PublicProfile,
    pub projects: Vec<ProjectRow>,
    pub skills: Vec<SkillRow>,
}

/// GET /api/v1/portfolio/:username
pub async fn handle_public_portfolio(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicPortfolio>, AppError> {
    let profile = profiles::get_profile_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No portfolio for '{username}'")))?;

    let user_id = profile.id;
    let project_list = projects::list_projects(&state.db, user_id).await?;
    let skill_list = skills::list_skills(&state.db, user_id).await?;

    Ok(Json(PublicPortfolio {
        profile: profile.into(),
        projects: project_list,
        skills: skill_list,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_public_profile_drops_subscription_fields() {
        let row = ProfileRow {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            role: "Engineer".to_string(),
            bio: "Builds things".to_string(),
            avatar_url: None,
            social_links: SqlJson(SocialLinks::new()),
            theme: "dark".to_string(),
            username: "ada".to_string(),
            subscription_plan: "pro".to_string(),
            subscription_status: "active".to_string(),
            subscription_ends_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public: PublicProfile = row.into();
        let value = serde_json::to_value(&public).unwrap();
        assert!(value.get("subscription_plan").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["username"], "ada");
    }
}

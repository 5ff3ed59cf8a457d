use axum::{extract::State, http::HeaderMap, Json};

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::models::profile::{ProfilePayload, ProfileRow};
use crate::state::AppState;
use crate::store::profiles::{self, ProfileWrite};
use crate::themes::DEFAULT_THEME;

/// GET /api/v1/profile
///
/// 404 until the first save — the dashboard treats that as an empty form.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileRow>, AppError> {
    let user = require_user(&state, &headers).await?;
    let profile = profiles::get_profile(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Create-or-update; at most one profile per user, keyed by identity.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<ProfileRow>, AppError> {
    let user = require_user(&state, &headers).await?;
    validate_profile(&payload).map_err(AppError::Validation)?;

    let links = payload.canonical_social_links();
    let write = ProfileWrite {
        name: payload.name.trim(),
        role: payload.role.trim(),
        bio: payload.bio.trim(),
        avatar_url: payload.avatar_url.as_deref(),
        social_links: &links,
        username: payload.username.trim(),
    };

    let saved = match profiles::get_profile(&state.db, user.id).await? {
        Some(_) => profiles::update_profile(&state.db, user.id, write)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?,
        None => profiles::insert_profile(&state.db, user.id, write, DEFAULT_THEME).await?,
    };

    Ok(Json(saved))
}

/// Required-field presence only; no format or length checks.
fn validate_profile(payload: &ProfilePayload) -> Result<(), String> {
    if payload.name.trim().is_empty() || payload.role.trim().is_empty() {
        return Err("name and role are required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, role: &str) -> ProfilePayload {
        serde_json::from_value(serde_json::json!({ "name": name, "role": role })).unwrap()
    }

    #[test]
    fn test_profile_requires_name_and_role() {
        assert!(validate_profile(&payload("", "Engineer")).is_err());
        assert!(validate_profile(&payload("Ada", "  ")).is_err());
        assert!(validate_profile(&payload("Ada", "Engineer")).is_ok());
    }
}

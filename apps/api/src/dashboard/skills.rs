use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::models::skill::{
    has_duplicate_name, has_duplicate_name_excluding, SkillLevel, SkillPayload, SkillRow,
};
use crate::state::AppState;
use crate::store::skills;

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub skills: Vec<SkillRow>,
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SkillListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let list = skills::list_skills(&state.db, user.id).await?;
    Ok(Json(SkillListResponse { skills: list }))
}

/// POST /api/v1/skills
///
/// The duplicate guard checks the stored collection before any insert.
/// Best-effort: a race between two sessions can still create duplicates.
pub async fn handle_create_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<SkillListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let (name, level) = validate_skill(&payload).map_err(AppError::Validation)?;

    let existing = skills::list_skills(&state.db, user.id).await?;
    if has_duplicate_name(&existing, name) {
        return Err(AppError::Validation("This skill already exists".to_string()));
    }

    skills::insert_skill(&state.db, user.id, name, level).await?;

    let list = skills::list_skills(&state.db, user.id).await?;
    Ok(Json(SkillListResponse { skills: list }))
}

/// GET /api/v1/skills/:id
pub async fn handle_get_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillRow>, AppError> {
    let user = require_user(&state, &headers).await?;
    let skill = skills::get_skill(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))?;
    Ok(Json(skill))
}

/// PUT /api/v1/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<SkillListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let (name, level) = validate_skill(&payload).map_err(AppError::Validation)?;

    let existing = skills::list_skills(&state.db, user.id).await?;
    if has_duplicate_name_excluding(&existing, name, id) {
        return Err(AppError::Validation("This skill already exists".to_string()));
    }

    skills::update_skill(&state.db, id, user.id, name, level)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))?;

    let list = skills::list_skills(&state.db, user.id).await?;
    Ok(Json(SkillListResponse { skills: list }))
}

/// DELETE /api/v1/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;

    let deleted = skills::delete_skill(&state.db, id, user.id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Skill {id} not found")));
    }

    let list = skills::list_skills(&state.db, user.id).await?;
    Ok(Json(SkillListResponse { skills: list }))
}

/// Non-empty name plus one of the three enumerated levels.
fn validate_skill(payload: &SkillPayload) -> Result<(&str, SkillLevel), String> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err("Skill name is required".to_string());
    }
    let level = SkillLevel::parse(&payload.level)
        .ok_or_else(|| "level must be one of beginner, intermediate, expert".to_string())?;
    Ok((name, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, level: &str) -> SkillPayload {
        serde_json::from_value(serde_json::json!({ "name": name, "level": level })).unwrap()
    }

    #[test]
    fn test_skill_requires_name() {
        assert!(validate_skill(&payload("", "expert")).is_err());
        assert!(validate_skill(&payload("   ", "expert")).is_err());
    }

    #[test]
    fn test_skill_requires_known_level() {
        assert!(validate_skill(&payload("Rust", "wizard")).is_err());
        assert!(validate_skill(&payload("Rust", "")).is_err());
    }

    #[test]
    fn test_valid_skill_passes_with_trimmed_name() {
        let skill = payload("  Rust  ", "expert");
        let (name, level) = validate_skill(&skill).unwrap();
        assert_eq!(name, "Rust");
        assert_eq!(level, SkillLevel::Expert);
    }
}

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::models::project::{ProjectPayload, ProjectRow};
use crate::state::AppState;
use crate::store::{profiles, projects};
use crate::subscription::{can_create_portfolio, plan_of, project_limit};

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectRow>,
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProjectListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let list = projects::list_projects(&state.db, user.id).await?;
    Ok(Json(ProjectListResponse { projects: list }))
}

/// POST /api/v1/projects
///
/// The subscription gate runs before the gateway write. Response is the
/// refreshed full collection.
pub async fn handle_create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    validate_project(&payload).map_err(AppError::Validation)?;

    let profile = profiles::get_profile(&state.db, user.id).await?;
    let plan = plan_of(profile.as_ref());
    let count = projects::count_projects(&state.db, user.id).await? as u32;
    if !can_create_portfolio(&plan, count) {
        let limit = project_limit(&plan)
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        return Err(AppError::PlanLimit(format!(
            "The {plan} plan allows up to {limit} projects"
        )));
    }

    projects::insert_project(&state.db, user.id, &payload).await?;

    let list = projects::list_projects(&state.db, user.id).await?;
    Ok(Json(ProjectListResponse { projects: list }))
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRow>, AppError> {
    let user = require_user(&state, &headers).await?;
    let project = projects::get_project(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    validate_project(&payload).map_err(AppError::Validation)?;

    projects::update_project(&state.db, id, user.id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let list = projects::list_projects(&state.db, user.id).await?;
    Ok(Json(ProjectListResponse { projects: list }))
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let user = require_user(&state, &headers).await?;

    let deleted = projects::delete_project(&state.db, id, user.id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }

    let list = projects::list_projects(&state.db, user.id).await?;
    Ok(Json(ProjectListResponse { projects: list }))
}

/// Title and description are mandatory; nothing else is checked.
fn validate_project(payload: &ProjectPayload) -> Result<(), String> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err("title and description are required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, description: &str) -> ProjectPayload {
        ProjectPayload {
            title: title.to_string(),
            description: description.to_string(),
            tags: vec![],
            image_url: None,
            live_url: None,
            repo_url: None,
        }
    }

    #[test]
    fn test_project_requires_title() {
        assert!(validate_project(&payload("", "A thing I built")).is_err());
        assert!(validate_project(&payload("   ", "A thing I built")).is_err());
    }

    #[test]
    fn test_project_requires_description() {
        assert!(validate_project(&payload("Demo", "")).is_err());
    }

    #[test]
    fn test_project_with_required_fields_passes() {
        assert!(validate_project(&payload("Demo", "A thing I built")).is_ok());
    }
}

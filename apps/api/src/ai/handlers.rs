//! Axum route handlers for the AI assistant endpoints. Generated content
//! is returned to the caller as a draft; nothing is persisted here except
//! through the bootstrap flow, which records every write it makes.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::ai::bootstrap::{run_bootstrap, BootstrapRequest, BootstrapResponse};
use crate::ai::PortfolioDraft;
use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BioRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BioResponse {
    pub bio: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDescriptionRequest {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDescriptionResponse {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillSuggestionsRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestionsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioDraftRequest {
    pub name: String,
    pub role: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/bio
pub async fn handle_generate_bio(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BioRequest>,
) -> Result<Json<BioResponse>, AppError> {
    require_user(&state, &headers).await?;

    if request.name.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "name and role are required".to_string(),
        ));
    }

    let bio = state
        .generator
        .generate_bio(request.name.trim(), request.role.trim(), &request.skills)
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(BioResponse { bio }))
}

/// POST /api/v1/ai/project-description
pub async fn handle_project_description(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ProjectDescriptionRequest>,
) -> Result<Json<ProjectDescriptionResponse>, AppError> {
    require_user(&state, &headers).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let description = state
        .generator
        .generate_project_description(request.title.trim(), &request.tags)
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(ProjectDescriptionResponse { description }))
}

/// POST /api/v1/ai/skills
///
/// Suggestions are filtered against the user's stored skills so none of
/// them duplicates an existing entry.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SkillSuggestionsRequest>,
) -> Result<Json<SkillSuggestionsResponse>, AppError> {
    let user = require_user(&state, &headers).await?;

    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role is required".to_string()));
    }

    let stored = store::skills::list_skills(&state.db, user.id).await?;
    let suggestions = state
        .generator
        .suggest_skills(request.role.trim())
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    let skills = suggestions
        .into_iter()
        .filter(|s| !stored.iter().any(|have| have.name.eq_ignore_ascii_case(s)))
        .collect();

    Ok(Json(SkillSuggestionsResponse { skills }))
}

/// POST /api/v1/ai/portfolio
///
/// Draft only — held in caller state until explicitly saved.
pub async fn handle_portfolio_draft(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PortfolioDraftRequest>,
) -> Result<Json<PortfolioDraft>, AppError> {
    require_user(&state, &headers).await?;

    if request.name.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "name and role are required".to_string(),
        ));
    }

    let draft = state
        .generator
        .generate_portfolio(request.name.trim(), request.role.trim())
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(draft))
}

/// POST /api/v1/ai/bootstrap
///
/// Generates a full portfolio and persists it as a compensated sequence.
pub async fn handle_bootstrap(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BootstrapRequest>,
) -> Result<Json<BootstrapResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let response = run_bootstrap(&state.db, state.generator.as_ref(), user.id, request).await?;
    Ok(Json(response))
}

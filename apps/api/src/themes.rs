//! Theme catalog and selection. Three themes ship on the free plan; the
//! rest require pro or enterprise.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;
use crate::store;
use crate::subscription::plan_of;

pub const DEFAULT_THEME: &str = "minimalist";

#[derive(Debug, Clone, Serialize)]
pub struct ThemeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub premium: bool,
}

pub const THEMES: &[ThemeInfo] = &[
    ThemeInfo {
        id: "minimalist",
        name: "Minimalist",
        premium: false,
    },
    ThemeInfo {
        id: "dark",
        name: "Dark",
        premium: false,
    },
    ThemeInfo {
        id: "classic",
        name: "Classic",
        premium: false,
    },
    ThemeInfo {
        id: "gradient",
        name: "Gradient",
        premium: true,
    },
    ThemeInfo {
        id: "editorial",
        name: "Editorial",
        premium: true,
    },
    ThemeInfo {
        id: "terminal",
        name: "Terminal",
        premium: true,
    },
];

pub fn theme_info(id: &str) -> Option<&'static ThemeInfo> {
    THEMES.iter().find(|t| t.id == id)
}

pub fn premium_themes_allowed(plan: &str) -> bool {
    matches!(plan, "pro" | "enterprise")
}

/// GET /api/v1/themes
pub async fn handle_list_themes() -> Json<&'static [ThemeInfo]> {
    Json(THEMES)
}

#[derive(Debug, Deserialize)]
pub struct SelectThemeRequest {
    pub theme: String,
}

/// PUT /api/v1/profile/theme
pub async fn handle_select_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SelectThemeRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    let user = require_user(&state, &headers).await?;

    let theme = theme_info(&request.theme)
        .ok_or_else(|| AppError::Validation(format!("Unknown theme '{}'", request.theme)))?;

    let profile = store::profiles::get_profile(&state.db, user.id).await?;
    if theme.premium && !premium_themes_allowed(&plan_of(profile.as_ref())) {
        return Err(AppError::PlanLimit(
            "Premium themes require a pro or enterprise plan".to_string(),
        ));
    }

    let updated = store::profiles::update_theme(&state.db, user.id, theme.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert!(theme_info("minimalist").is_some());
        assert!(theme_info("vaporwave").is_none());
    }

    #[test]
    fn test_default_theme_is_free() {
        let theme = theme_info(DEFAULT_THEME).unwrap();
        assert!(!theme.premium);
    }

    #[test]
    fn test_three_free_themes() {
        assert_eq!(THEMES.iter().filter(|t| !t.premium).count(), 3);
    }

    #[test]
    fn test_premium_gate_by_plan() {
        assert!(!premium_themes_allowed("free"));
        assert!(premium_themes_allowed("pro"));
        assert!(premium_themes_allowed("enterprise"));
        assert!(!premium_themes_allowed("platinum"));
    }
}

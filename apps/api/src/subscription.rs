//! Subscription plans and the pure policy gate. The gate is enforced at
//! the handler layer before any project create reaches the data gateway.

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct PlanInfo {
    pub id: &'static str,
    pub price: u32,
    pub currency: &'static str,
    /// None = unlimited.
    pub project_limit: Option<u32>,
    pub features: &'static [&'static str],
}

pub const PLANS: &[PlanInfo] = &[
    PlanInfo {
        id: "free",
        price: 0,
        currency: "INR",
        project_limit: Some(2),
        features: &[
            "2 Portfolio Projects",
            "Basic Themes (3)",
            "Public Portfolio URL",
            "Basic Analytics",
            "Community Support",
            "AI Bio Generation",
        ],
    },
    PlanInfo {
        id: "pro",
        price: 500,
        currency: "INR",
        project_limit: Some(6),
        features: &[
            "6 Portfolio Projects",
            "All Premium Themes (15+)",
            "Custom Portfolio URL",
            "Advanced Analytics & Views",
            "AI Content Generation",
            "Project Source Tracking",
            "Email Support",
            "SEO Optimization",
            "Social Media Integration",
        ],
    },
    PlanInfo {
        id: "enterprise",
        price: 2000,
        currency: "INR",
        project_limit: None,
        features: &[
            "Unlimited Portfolio Projects",
            "All Themes + Custom Themes",
            "Multiple Custom Domains (5)",
            "Advanced Analytics Dashboard",
            "AI-Powered Content Suite",
            "Portfolio Performance Insights",
            "Priority 24/7 Support",
            "Technical Support & Customization",
            "White-label Branding",
            "API Access",
            "Team Collaboration Tools",
            "Custom Integrations",
        ],
    },
];

pub fn plan_info(plan: &str) -> Option<&'static PlanInfo> {
    PLANS.iter().find(|p| p.id == plan)
}

/// True iff the plan allows creating one more project on top of
/// `current_count`. Unknown plans get nothing.
pub fn can_create_portfolio(plan: &str, current_count: u32) -> bool {
    match plan_info(plan) {
        Some(info) => match info.project_limit {
            Some(limit) => current_count < limit,
            None => true,
        },
        None => false,
    }
}

/// Project ceiling for a plan. None = unlimited; unknown plan → Some(0).
pub fn project_limit(plan: &str) -> Option<u32> {
    match plan_info(plan) {
        Some(info) => info.project_limit,
        None => Some(0),
    }
}

pub fn has_feature(plan: &str, feature: &str) -> bool {
    plan_info(plan).is_some_and(|info| info.features.contains(&feature))
}

/// Subscription projection of a profile row. A missing profile or blank
/// fields default to an active free plan, as older revisions did.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub plan: String,
    pub status: String,
    pub ends_at: Option<DateTime<Utc>>,
}

pub fn subscription_of(profile: Option<&ProfileRow>) -> Subscription {
    match profile {
        Some(p) => Subscription {
            plan: if p.subscription_plan.is_empty() {
                "free".to_string()
            } else {
                p.subscription_plan.clone()
            },
            status: if p.subscription_status.is_empty() {
                "active".to_string()
            } else {
                p.subscription_status.clone()
            },
            ends_at: p.subscription_ends_at,
        },
        None => Subscription {
            plan: "free".to_string(),
            status: "active".to_string(),
            ends_at: None,
        },
    }
}

pub fn plan_of(profile: Option<&ProfileRow>) -> String {
    subscription_of(profile).plan
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/plans
pub async fn handle_list_plans() -> Json<&'static [PlanInfo]> {
    Json(PLANS)
}

/// GET /api/v1/subscription
pub async fn handle_get_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Subscription>, AppError> {
    let user = require_user(&state, &headers).await?;
    let profile = store::profiles::get_profile(&state.db, user.id).await?;
    Ok(Json(subscription_of(profile.as_ref())))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub plan: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    "active".to_string()
}

/// PUT /api/v1/subscription
///
/// Called after the upstream payment flow settles; payment itself is not
/// this service's concern.
pub async fn handle_update_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<Json<Subscription>, AppError> {
    let user = require_user(&state, &headers).await?;

    if plan_info(&request.plan).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown plan '{}'",
            request.plan
        )));
    }
    if !matches!(request.status.as_str(), "active" | "cancelled" | "expired") {
        return Err(AppError::Validation(
            "status must be one of active, cancelled, expired".to_string(),
        ));
    }

    let updated = store::profiles::update_subscription(
        &state.db,
        user.id,
        &request.plan,
        &request.status,
        request.ends_at,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(subscription_of(Some(&updated))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_under_limit() {
        assert!(can_create_portfolio("free", 0));
        assert!(can_create_portfolio("free", 1));
    }

    #[test]
    fn test_free_plan_at_limit() {
        assert!(!can_create_portfolio("free", 2));
        assert!(!can_create_portfolio("free", 3));
    }

    #[test]
    fn test_pro_plan_boundary() {
        assert!(can_create_portfolio("pro", 5));
        assert!(!can_create_portfolio("pro", 6));
    }

    #[test]
    fn test_enterprise_is_unlimited() {
        assert!(can_create_portfolio("enterprise", 10_000));
    }

    #[test]
    fn test_unknown_plan_gets_nothing() {
        assert!(!can_create_portfolio("platinum", 0));
    }

    #[test]
    fn test_project_limits() {
        assert_eq!(project_limit("free"), Some(2));
        assert_eq!(project_limit("pro"), Some(6));
        assert_eq!(project_limit("enterprise"), None);
        assert_eq!(project_limit("platinum"), Some(0));
    }

    #[test]
    fn test_has_feature() {
        assert!(has_feature("free", "AI Bio Generation"));
        assert!(has_feature("pro", "SEO Optimization"));
        assert!(!has_feature("free", "SEO Optimization"));
        assert!(!has_feature("platinum", "API Access"));
    }

    #[test]
    fn test_subscription_defaults_without_profile() {
        let sub = subscription_of(None);
        assert_eq!(sub.plan, "free");
        assert_eq!(sub.status, "active");
        assert!(sub.ends_at.is_none());
    }
}

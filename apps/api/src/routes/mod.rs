pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{ai, auth, dashboard, public, storage, subscription, themes};

/// Body limit covering the largest accepted upload (10 MB project image)
/// plus multipart framing. Per-kind ceilings are enforced in the storage
/// gateway before any S3 call.
const BODY_LIMIT_BYTES: usize = 11 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handlers::handle_signup))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/logout", post(auth::handlers::handle_logout))
        .route("/api/v1/auth/me", get(auth::handlers::handle_me))
        // Profile
        .route(
            "/api/v1/profile",
            get(dashboard::profile::handle_get_profile)
                .put(dashboard::profile::handle_save_profile),
        )
        .route("/api/v1/profile/theme", put(themes::handle_select_theme))
        // Projects
        .route(
            "/api/v1/projects",
            get(dashboard::projects::handle_list_projects)
                .post(dashboard::projects::handle_create_project),
        )
        .route(
            "/api/v1/projects/:id",
            get(dashboard::projects::handle_get_project)
                .put(dashboard::projects::handle_update_project)
                .delete(dashboard::projects::handle_delete_project),
        )
        // Skills
        .route(
            "/api/v1/skills",
            get(dashboard::skills::handle_list_skills)
                .post(dashboard::skills::handle_create_skill),
        )
        .route(
            "/api/v1/skills/:id",
            get(dashboard::skills::handle_get_skill)
                .put(dashboard::skills::handle_update_skill)
                .delete(dashboard::skills::handle_delete_skill),
        )
        // Uploads
        .route(
            "/api/v1/uploads/avatar",
            post(storage::handlers::handle_avatar_upload),
        )
        .route(
            "/api/v1/uploads/project-image",
            post(storage::handlers::handle_project_image_upload),
        )
        // AI assistant
        .route("/api/v1/ai/bio", post(ai::handlers::handle_generate_bio))
        .route(
            "/api/v1/ai/project-description",
            post(ai::handlers::handle_project_description),
        )
        .route("/api/v1/ai/skills", post(ai::handlers::handle_suggest_skills))
        .route(
            "/api/v1/ai/portfolio",
            post(ai::handlers::handle_portfolio_draft),
        )
        .route("/api/v1/ai/bootstrap", post(ai::handlers::handle_bootstrap))
        // Catalogs and subscription
        .route("/api/v1/themes", get(themes::handle_list_themes))
        .route("/api/v1/plans", get(subscription::handle_list_plans))
        .route(
            "/api/v1/subscription",
            get(subscription::handle_get_subscription)
                .put(subscription::handle_update_subscription),
        )
        // Public portfolio view
        .route(
            "/api/v1/portfolio/:username",
            get(public::handle_public_portfolio),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

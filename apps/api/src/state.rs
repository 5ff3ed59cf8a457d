use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::ai::ContentGenerator;
use crate::auth::AuthClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every external-service client is constructed once in
/// `main` and injected here, so handlers are testable with substitutable
/// fakes.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub auth: AuthClient,
    /// Live Gemini client or the simulated template generator, selected
    /// once at startup by `AI_MODE`.
    pub generator: Arc<dyn ContentGenerator>,
    pub config: Config,
}

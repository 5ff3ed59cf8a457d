mod ai;
mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod models;
mod public;
mod routes;
mod state;
mod storage;
mod store;
mod subscription;
mod themes;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::gemini::GeminiClient;
use crate::ai::template::TemplateGenerator;
use crate::ai::ContentGenerator;
use crate::auth::AuthClient;
use crate::config::{AiMode, Config};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vizfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize the auth gateway
    let auth = AuthClient::new(config.auth_url.clone(), config.auth_anon_key.clone());
    info!("Auth gateway initialized ({})", config.auth_url);

    // Select the content generator — an explicit, observable choice
    let generator: Arc<dyn ContentGenerator> = match config.ai_mode {
        AiMode::Live => {
            let api_key = config
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY is required when AI_MODE=live")?;
            Arc::new(GeminiClient::new(api_key))
        }
        AiMode::Simulated => Arc::new(TemplateGenerator),
    };
    info!(
        "AI content generator initialized (mode: {})",
        config.ai_mode.as_str()
    );

    // Build app state
    let state = AppState {
        db,
        s3,
        auth,
        generator,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "vizfolio-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

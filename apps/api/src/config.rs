use anyhow::{bail, Context, Result};

/// Selects how AI content is produced: a real call to the hosted Gemini
/// endpoint, or deterministic role-keyed templates with no network I/O.
/// Resolved once at startup and logged — never an implicit code fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    Live,
    Simulated,
}

impl AiMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "live" => Ok(AiMode::Live),
            "simulated" => Ok(AiMode::Simulated),
            other => bail!("AI_MODE must be 'live' or 'simulated', got '{other}'"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiMode::Live => "live",
            AiMode::Simulated => "simulated",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub auth_url: String,
    pub auth_anon_key: String,
    pub ai_mode: AiMode,
    /// Required when `ai_mode` is Live. The key never leaves the server.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ai_mode =
            AiMode::parse(&std::env::var("AI_MODE").unwrap_or_else(|_| "live".to_string()))?;

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        if ai_mode == AiMode::Live && gemini_api_key.is_none() {
            bail!("GEMINI_API_KEY is required when AI_MODE=live");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            auth_url: require_env("AUTH_URL")?,
            auth_anon_key: require_env("AUTH_ANON_KEY")?,
            ai_mode,
            gemini_api_key,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_mode_parse_live() {
        assert_eq!(AiMode::parse("live").unwrap(), AiMode::Live);
    }

    #[test]
    fn test_ai_mode_parse_simulated() {
        assert_eq!(AiMode::parse("simulated").unwrap(), AiMode::Simulated);
    }

    #[test]
    fn test_ai_mode_rejects_unknown() {
        assert!(AiMode::parse("mock").is_err());
    }
}

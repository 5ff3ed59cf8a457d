/// Auth Gateway — the single point of entry for calls to the hosted
/// identity service. Session persistence and token refresh stay upstream;
/// this crate only forwards credentials and resolves bearer tokens.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub mod handlers;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Auth API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl AuthError {
    /// Upstream 4xx means the request itself was rejected (bad credentials,
    /// duplicate email); anything else is a service failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Api { status, .. } if (400..500).contains(status))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(alias = "error_description", alias = "msg")]
    message: String,
}

/// The single auth client used by all handlers.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        let user: AuthUser = check_status(response).await?.json().await?;
        debug!("Signed up user {}", user.id);
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!("{}/token?grant_type=password", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        let session: AuthSession = check_status(response).await?.json().await?;
        debug!("Signed in user {}", session.user.id);
        Ok(session)
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Resolves a bearer token to its user. The only identity source in
    /// the system — data handlers fetch nothing without it.
    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<UpstreamError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(AuthError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AuthClient::new("https://auth.example.com/".to_string(), "key".to_string());
        assert_eq!(client.base_url, "https://auth.example.com");
    }

    #[test]
    fn test_rejection_classification() {
        let rejected = AuthError::Api {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert!(rejected.is_rejection());

        let outage = AuthError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(!outage.is_rejection());
    }

    #[test]
    fn test_upstream_error_message_aliases() {
        let gotrue: UpstreamError =
            serde_json::from_str(r#"{"msg": "User already registered"}"#).unwrap();
        assert_eq!(gotrue.message, "User already registered");

        let oauth: UpstreamError =
            serde_json::from_str(r#"{"error_description": "Invalid login credentials"}"#).unwrap();
        assert_eq!(oauth.message, "Invalid login credentials");
    }

    #[test]
    fn test_auth_user_deserializes_upstream_shape() {
        let user: AuthUser = serde_json::from_str(
            r#"{"id": "7f8a1c52-3d4e-4f60-9b21-0c9d8e7f6a5b", "email": "ada@example.com", "aud": "authenticated"}"#,
        )
        .unwrap();
        assert_eq!(user.email, "ada@example.com");
    }
}

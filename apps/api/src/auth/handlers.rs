use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::{AuthError, AuthSession, AuthUser};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<AuthUser>, AppError> {
    validate_credentials(&payload)?;
    let user = state
        .auth
        .sign_up(&payload.email, &payload.password)
        .await
        .map_err(rejection_or_outage)?;
    Ok(Json(user))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<AuthSession>, AppError> {
    validate_credentials(&payload)?;
    let session = state
        .auth
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(rejection_or_outage)?;
    Ok(Json(session))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    state
        .auth
        .sign_out(token)
        .await
        .map_err(rejection_or_outage)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthUser>, AppError> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(user))
}

/// Resolves the request's bearer token to a user through the auth gateway.
/// A request with no resolvable identity gets an access-denied answer and
/// no data fetch happens.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;
    state.auth.current_user(token).await.map_err(|e| {
        if e.is_rejection() {
            AppError::Unauthorized
        } else {
            AppError::Auth(e.to_string())
        }
    })
}

fn validate_credentials(payload: &CredentialsPayload) -> Result<(), AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Upstream 4xx surfaces as a validation error with the upstream message;
/// everything else is an auth-service outage.
fn rejection_or_outage(e: AuthError) -> AppError {
    match &e {
        AuthError::Api { message, .. } if e.is_rejection() => AppError::Validation(message.clone()),
        _ => AppError::Auth(e.to_string()),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_credentials_are_rejected_locally() {
        let payload = CredentialsPayload {
            email: "  ".to_string(),
            password: "pw".to_string(),
        };
        assert!(validate_credentials(&payload).is_err());

        let payload = CredentialsPayload {
            email: "ada@example.com".to_string(),
            password: String::new(),
        };
        assert!(validate_credentials(&payload).is_err());
    }

    #[test]
    fn test_upstream_rejection_maps_to_validation() {
        let err = rejection_or_outage(AuthError::Api {
            status: 422,
            message: "User already registered".to_string(),
        });
        assert!(matches!(err, AppError::Validation(m) if m == "User already registered"));
    }

    #[test]
    fn test_upstream_outage_maps_to_auth_error() {
        let err = rejection_or_outage(AuthError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        });
        assert!(matches!(err, AppError::Auth(_)));
    }
}

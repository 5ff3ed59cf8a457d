use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{extension_for, public_url, upload_object, validate_upload, UploadKind};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/v1/uploads/avatar
///
/// One avatar per user — re-uploads overwrite the same key.
pub async fn handle_avatar_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let file = read_file_field(multipart).await?;
    validate_upload(UploadKind::Avatar, &file.content_type, file.bytes.len())
        .map_err(AppError::Validation)?;

    let ext = extension_for(&file.content_type)
        .ok_or_else(|| AppError::Validation("Unsupported image format".to_string()))?;
    let key = format!("{}/{}/avatar.{}", UploadKind::Avatar.key_prefix(), user.id, ext);

    upload_object(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        file.bytes,
        &file.content_type,
    )
    .await?;

    info!("Uploaded avatar for user {}", user.id);
    Ok(Json(UploadResponse {
        url: public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key),
    }))
}

/// POST /api/v1/uploads/project-image
pub async fn handle_project_image_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let user = require_user(&state, &headers).await?;
    let file = read_file_field(multipart).await?;
    validate_upload(UploadKind::ProjectImage, &file.content_type, file.bytes.len())
        .map_err(AppError::Validation)?;

    let ext = extension_for(&file.content_type)
        .ok_or_else(|| AppError::Validation("Unsupported image format".to_string()))?;
    let key = format!(
        "{}/{}/{}.{}",
        UploadKind::ProjectImage.key_prefix(),
        user.id,
        Uuid::new_v4(),
        ext
    );

    upload_object(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        file.bytes,
        &file.content_type,
    )
    .await?;

    info!("Uploaded project image for user {}", user.id);
    Ok(Json(UploadResponse {
        url: public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key),
    }))
}

struct UploadedFile {
    content_type: String,
    bytes: bytes::Bytes,
}

/// Pulls the first `file` field out of a multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_default();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation("No file provided".to_string()))
}

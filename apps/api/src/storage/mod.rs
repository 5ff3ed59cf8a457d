/// Object Storage Gateway — pre-upload validation, S3 put, public URL.
/// Files failing the local checks are rejected before any storage call.
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use crate::errors::AppError;

pub mod handlers;

const MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Avatar,
    ProjectImage,
}

impl UploadKind {
    pub fn max_bytes(&self) -> usize {
        match self {
            UploadKind::Avatar => 5 * MB,
            UploadKind::ProjectImage => 10 * MB,
        }
    }

    pub fn key_prefix(&self) -> &'static str {
        match self {
            UploadKind::Avatar => "avatars",
            UploadKind::ProjectImage => "project-images",
        }
    }
}

/// Local gate: image MIME type only, per-kind size ceiling.
pub fn validate_upload(kind: UploadKind, content_type: &str, size: usize) -> Result<(), String> {
    if !content_type.starts_with("image/") {
        return Err("Please select an image file".to_string());
    }
    if size > kind.max_bytes() {
        return Err(format!(
            "File size must be less than {}MB",
            kind.max_bytes() / MB
        ));
    }
    Ok(())
}

/// File extension for the stored object key, derived from the MIME type
/// rather than the client-supplied filename.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

pub async fn upload_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    bytes: Bytes,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    Ok(())
}

/// Public URL for a stored object (path-style, MinIO compatible).
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversize_avatar_is_rejected() {
        let result = validate_upload(UploadKind::Avatar, "image/png", 6 * MB);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("5MB"));
    }

    #[test]
    fn test_avatar_at_limit_is_accepted() {
        assert!(validate_upload(UploadKind::Avatar, "image/png", 5 * MB).is_ok());
    }

    #[test]
    fn test_non_image_is_rejected_for_both_kinds() {
        assert!(validate_upload(UploadKind::Avatar, "application/pdf", 1024).is_err());
        assert!(validate_upload(UploadKind::ProjectImage, "text/html", 1024).is_err());
    }

    #[test]
    fn test_project_image_allows_up_to_ten_mb() {
        assert!(validate_upload(UploadKind::ProjectImage, "image/jpeg", 9 * MB).is_ok());
        assert!(validate_upload(UploadKind::ProjectImage, "image/jpeg", 11 * MB).is_err());
    }

    #[test]
    fn test_extension_from_mime_type() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("application/octet-stream"), None);
    }

    #[test]
    fn test_public_url_shape() {
        assert_eq!(
            public_url("http://localhost:9000/", "vizfolio", "avatars/u1/avatar.png"),
            "http://localhost:9000/vizfolio/avatars/u1/avatar.png"
        );
    }
}

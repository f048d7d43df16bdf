//! Pre-signed URL generation for stored files.

use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

use crate::authz::{self, FileDecision};
use crate::cdn;
use crate::claims::UserIdentity;
use crate::error::ApiError;
use crate::sessions;
use crate::types::{SignedUploadResponse, SignedUrlResponse};
use crate::AppState;

pub const DOWNLOAD_EXPIRY_SECS: u64 = 3600;
pub const AVATAR_EXPIRY_SECS: u64 = 86400;
pub const UPLOAD_EXPIRY_SECS: u64 = 900;

/// Object name every avatar is stored under inside `avatars/<userId>/`.
const AVATAR_OBJECT_NAME: &str = "avatar";

/// Authorize and sign a download URL for `file_key`.
pub async fn fetch_file_url(
    state: &AppState,
    identity: &UserIdentity,
    file_key: &str,
    request_host: &str,
) -> Result<SignedUrlResponse, ApiError> {
    match authz::authorize_file_read(file_key, &identity.user_id)? {
        FileDecision::Allow => {}
        FileDecision::RequiresSessionOwner { session_id } => {
            sessions::require_session_owner(state, &session_id, &identity.user_id).await?;
        }
    }

    let url = presign_get(state, file_key, DOWNLOAD_EXPIRY_SECS).await?;

    Ok(SignedUrlResponse {
        url: cdn::rewrite_signed_host(&url, request_host),
        expires_in: DOWNLOAD_EXPIRY_SECS,
    })
}

/// Sign a download URL for a user's avatar. Avatars are public-readable, so
/// there is no caller identity here.
pub async fn fetch_avatar_url(
    state: &AppState,
    user_id: &str,
    request_host: &str,
) -> Result<SignedUrlResponse, ApiError> {
    let key = format!("avatars/{}/{}", user_id, AVATAR_OBJECT_NAME);
    let url = presign_get(state, &key, AVATAR_EXPIRY_SECS).await?;

    Ok(SignedUrlResponse {
        url: cdn::rewrite_signed_host(&url, request_host),
        expires_in: AVATAR_EXPIRY_SECS,
    })
}

/// Authorize and sign an upload URL. The object is annotated with who
/// requested the upload and when.
pub async fn fetch_upload_url(
    state: &AppState,
    identity: &UserIdentity,
    file_key: &str,
    content_type: &str,
    request_host: &str,
) -> Result<SignedUploadResponse, ApiError> {
    authz::authorize_upload_key(file_key, &identity.user_id)?;

    let presigned = state
        .s3_client
        .put_object()
        .bucket(&state.config.bucket)
        .key(file_key)
        .content_type(content_type)
        .metadata("uploaded-by", &identity.user_id)
        .metadata("uploaded-at", chrono::Utc::now().to_rfc3339())
        .presigned(presigning_config(UPLOAD_EXPIRY_SECS)?)
        .await
        .map_err(|e| {
            tracing::error!("Failed to presign upload for {}: {:?}", file_key, e);
            ApiError::Dependency("Could not generate upload URL".to_string())
        })?;

    Ok(SignedUploadResponse {
        upload_url: cdn::rewrite_signed_host(presigned.uri(), request_host),
        file_key: file_key.to_string(),
        expires_in: UPLOAD_EXPIRY_SECS,
    })
}

async fn presign_get(state: &AppState, key: &str, expiry_secs: u64) -> Result<String, ApiError> {
    let presigned = state
        .s3_client
        .get_object()
        .bucket(&state.config.bucket)
        .key(key)
        .presigned(presigning_config(expiry_secs)?)
        .await
        .map_err(|e| {
            tracing::error!("Failed to presign download for {}: {:?}", key, e);
            ApiError::Dependency("Could not generate file URL".to_string())
        })?;

    Ok(presigned.uri().to_string())
}

fn presigning_config(expiry_secs: u64) -> Result<PresigningConfig, ApiError> {
    PresigningConfig::expires_in(Duration::from_secs(expiry_secs))
        .map_err(|e| ApiError::Configuration(format!("Invalid presigning expiry: {}", e)))
}

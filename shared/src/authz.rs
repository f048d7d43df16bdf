//! Ownership rules for stored files and resource paths.
//!
//! Ownership is positional: keys look like `<folder>/<ownerId>/<name>`, so
//! every decision here reduces to splitting the key on `/` and comparing one
//! segment against the caller. The single exception is the `voice-tests/`
//! namespace, whose second segment is a session id that must be resolved to
//! its owning user through the sessions table.

use crate::error::ApiError;

/// Folders a client may upload into.
const UPLOAD_FOLDERS: [&str; 3] = ["avatars", "attachments", "uploads"];

/// Outcome of a file-key check that could be decided without a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDecision {
    Allow,
    /// The key belongs to a system-generated session namespace; the session
    /// must be resolved to its owning user, which must match the caller.
    RequiresSessionOwner { session_id: String },
}

/// Authorize a read of `key` by `caller_id`.
pub fn authorize_file_read(key: &str, caller_id: &str) -> Result<FileDecision, ApiError> {
    let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["attachments", owner_id, ..] => {
            if *owner_id == caller_id {
                Ok(FileDecision::Allow)
            } else {
                Err(forbidden(key, caller_id))
            }
        }
        ["voice-tests", session_id, ..] => Ok(FileDecision::RequiresSessionOwner {
            session_id: (*session_id).to_string(),
        }),
        // Avatars are public-readable.
        ["avatars", ..] => Ok(FileDecision::Allow),
        _ => Err(forbidden(key, caller_id)),
    }
}

/// Validate and authorize an upload key of the form `folder/ownerId/filename`.
///
/// Writes are only ever issued through upload keys, so this rule also carries
/// the owner-only side of the avatar contract: avatars are public-readable
/// but only their owner may write `avatars/<ownerId>/...`.
///
/// A key with the wrong number of segments is a malformed request, not a
/// permission failure, and is rejected before any ownership comparison.
pub fn authorize_upload_key(key: &str, caller_id: &str) -> Result<(), ApiError> {
    let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() != 3 {
        return Err(ApiError::Validation(format!(
            "fileKey must have exactly 3 path segments (folder/userId/fileName), got {}",
            segments.len()
        )));
    }

    let (folder, owner_id) = (segments[0], segments[1]);

    if !UPLOAD_FOLDERS.contains(&folder) {
        return Err(ApiError::Forbidden(format!(
            "Uploads to folder '{}' are not allowed",
            folder
        )));
    }

    if owner_id != caller_id {
        return Err(forbidden(key, caller_id));
    }

    Ok(())
}

/// Require that a path-parameter user id names the caller's own resources.
pub fn require_owner(path_user_id: &str, caller_id: &str) -> Result<(), ApiError> {
    if path_user_id == caller_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You can only access your own data".to_string(),
        ))
    }
}

fn forbidden(key: &str, caller_id: &str) -> ApiError {
    tracing::warn!("Denied access to key {} for user {}", key, caller_id);
    ApiError::Forbidden("Access denied".to_string())
}

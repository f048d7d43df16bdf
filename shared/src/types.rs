use serde::{Deserialize, Serialize};

// ========== VOICE EVENT ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VoiceEvent {
    pub user_id: String,
    pub event_id: String,
    #[serde(rename = "type")]
    pub event_type: String, // self_test | surgery | training | hospital_test | feeling_log | ...
    pub date: String,
    pub status: String, // approved | pending_approval
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Display name denormalized onto the event at creation time; the public
    /// dashboard shows this instead of the raw identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_url: String,
    pub file_type: String,
    pub file_name: String,
}

/// Projection of an approved event for the public dashboard: attachments,
/// moderation status and update times are stripped, and the owner's raw
/// identity is replaced by a nickname.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicEvent {
    pub event_id: String,
    pub nickname: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: String,
    pub details: serde_json::Value,
    pub created_at: String,
}

// ========== USER PROFILE ==========
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub user_id: String,
    pub profile: serde_json::Value,
    /// Always taken from the caller's token claims, never from the stored
    /// item or the request body.
    pub nickname: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub profile: serde_json::Value,
}

// ========== SIGNED URLS ==========
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub url: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadResponse {
    pub upload_url: String,
    pub file_key: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlRequest {
    pub file_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub file_key: String,
    pub content_type: String,
}

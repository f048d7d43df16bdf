//! User profile updates.
//!
//! The nickname lives with the identity provider, not in the profile table:
//! clients cannot smuggle one in through the body, and responses always carry
//! the nickname derived from the caller's token.

use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use crate::claims::UserIdentity;
use crate::dynamo;
use crate::error::ApiError;
use crate::types::ProfileRecord;
use crate::AppState;

/// Overwrite the caller's profile and return the stored record.
pub async fn update_profile(
    state: &AppState,
    identity: &UserIdentity,
    profile: serde_json::Value,
) -> Result<ProfileRecord, ApiError> {
    let profile = strip_nickname(profile)?;
    let now = chrono::Utc::now().to_rfc3339();

    let result = state
        .dynamo_client
        .update_item()
        .table_name(&state.config.profiles_table)
        .key("userId", AttributeValue::S(identity.user_id.clone()))
        .update_expression("SET profile = :p, updatedAt = :u")
        .expression_attribute_values(":p", dynamo::json_to_attr(&profile))
        .expression_attribute_values(":u", AttributeValue::S(now.clone()))
        .return_values(ReturnValue::AllNew)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Profile update failed for {}: {:?}", identity.user_id, e);
            ApiError::Dependency("Could not update profile".to_string())
        })?;

    let stored = result
        .attributes()
        .and_then(|attrs| attrs.get("profile"))
        .map(dynamo::attr_to_json)
        .unwrap_or(profile);

    Ok(ProfileRecord {
        user_id: identity.user_id.clone(),
        profile: stored,
        nickname: identity.nickname.clone(),
        updated_at: now,
    })
}

/// Drop any client-submitted nickname; the field is owned by the identity
/// provider and silently ignored here.
fn strip_nickname(profile: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    match profile {
        serde_json::Value::Object(mut map) => {
            map.remove("nickname");
            Ok(serde_json::Value::Object(map))
        }
        _ => Err(ApiError::Validation(
            "profile must be a JSON object".to_string(),
        )),
    }
}

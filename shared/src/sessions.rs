use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::ApiError;
use crate::AppState;

/// Resolve the user that owns an analysis session.
///
/// A session that does not exist (or has no owner recorded) is reported the
/// same way as a foreign one; callers see a plain denial either way.
pub async fn require_session_owner(
    state: &AppState,
    session_id: &str,
    caller_id: &str,
) -> Result<(), ApiError> {
    let result = state
        .dynamo_client
        .get_item()
        .table_name(&state.config.sessions_table)
        .key("sessionId", AttributeValue::S(session_id.to_string()))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Session lookup failed for {}: {:?}", session_id, e);
            ApiError::Dependency("Could not verify file ownership".to_string())
        })?;

    let owner = result
        .item()
        .and_then(|item| item.get("userId"))
        .and_then(|v| v.as_s().ok());

    match owner {
        Some(owner) if owner == caller_id => Ok(()),
        _ => {
            tracing::warn!(
                "Denied session access: user {} on session {}",
                caller_id,
                session_id
            );
            Err(ApiError::Forbidden("Access denied".to_string()))
        }
    }
}

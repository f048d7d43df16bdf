//! Reads against the voice-event table.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::dynamo;
use crate::error::ApiError;
use crate::types::{PublicEvent, VoiceEvent};
use crate::AppState;

const APPROVED: &str = "approved";

/// List every event belonging to `user_id`, newest first.
///
/// Callers must have authorized the user id against the token before calling;
/// this function issues the query unconditionally.
pub async fn list_user_events(
    state: &AppState,
    user_id: &str,
) -> Result<Vec<VoiceEvent>, ApiError> {
    let result = state
        .dynamo_client
        .query()
        .table_name(&state.config.events_table)
        .key_condition_expression("userId = :uid")
        .expression_attribute_values(":uid", AttributeValue::S(user_id.to_string()))
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Event query failed for user {}: {:?}", user_id, e);
            ApiError::Dependency("Could not fetch events".to_string())
        })?;

    let mut events: Vec<VoiceEvent> = result
        .items()
        .iter()
        .filter_map(parse_event)
        .collect();

    sort_newest_first(&mut events);
    Ok(events)
}

/// List approved events across all users for the public dashboard, newest
/// first, in their stripped public projection.
pub async fn list_public_events(state: &AppState) -> Result<Vec<PublicEvent>, ApiError> {
    let mut events: Vec<VoiceEvent> = Vec::new();
    let mut start_key: Option<HashMap<String, AttributeValue>> = None;

    loop {
        let mut req = state
            .dynamo_client
            .scan()
            .table_name(&state.config.events_table)
            .filter_expression("#st = :approved")
            .expression_attribute_names("#st", "status")
            .expression_attribute_values(":approved", AttributeValue::S(APPROVED.to_string()));
        if let Some(key) = start_key.take() {
            req = req.set_exclusive_start_key(Some(key));
        }

        let result = req.send().await.map_err(|e| {
            tracing::error!("Public event scan failed: {:?}", e);
            ApiError::Dependency("Could not fetch events".to_string())
        })?;

        events.extend(result.items().iter().filter_map(parse_event));

        match result.last_evaluated_key() {
            Some(key) if !key.is_empty() => start_key = Some(key.clone()),
            _ => break,
        }
    }

    sort_newest_first(&mut events);
    Ok(events.into_iter().map(public_projection).collect())
}

/// Strip an approved event down to its public shape.
pub fn public_projection(event: VoiceEvent) -> PublicEvent {
    PublicEvent {
        event_id: event.event_id,
        nickname: event.nickname.unwrap_or_else(|| "Anonymous".to_string()),
        event_type: event.event_type,
        date: event.date,
        details: event.details,
        created_at: event.created_at,
    }
}

fn parse_event(item: &HashMap<String, AttributeValue>) -> Option<VoiceEvent> {
    match serde_json::from_value(dynamo::item_to_json(item)) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Skipping malformed event item: {}", e);
            None
        }
    }
}

fn sort_newest_first(events: &mut [VoiceEvent]) {
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

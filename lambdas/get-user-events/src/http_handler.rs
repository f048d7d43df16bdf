use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use vfs_shared::{
    authz, claims,
    error::ApiError,
    events,
    respond::{self, Cors},
    AppState,
};

const CORS: Cors = Cors::new("GET,OPTIONS");

/// Lists the caller's own events, newest first.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!("get-user-events invoked: {} {}", event.method(), event.uri().path());

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::GET {
        return respond::method_not_allowed(CORS);
    }

    let identity = match claims::extract_identity(&event) {
        Ok(identity) => identity,
        Err(err) => return respond::error(CORS, &err),
    };

    let user_id = match user_id_from(&event) {
        Ok(user_id) => user_id,
        Err(err) => return respond::error(CORS, &err),
    };

    // The query must never run for a denied caller.
    if let Err(err) = authz::require_owner(&user_id, &identity.user_id) {
        tracing::warn!(
            "Denied event listing: user {} asked for {}",
            identity.user_id,
            user_id
        );
        return respond::error(CORS, &err);
    }

    match events::list_user_events(&state, &user_id).await {
        Ok(events) => respond::json(CORS, StatusCode::OK, &serde_json::json!({ "events": events })),
        Err(err) => respond::error(CORS, &err),
    }
}

fn user_id_from(event: &Request) -> Result<String, ApiError> {
    let params = event.path_parameters();
    if let Some(user_id) = params.first("userId") {
        return Ok(user_id.to_string());
    }

    let path = event.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., "events", user_id] => Ok((*user_id).to_string()),
        _ => Err(ApiError::Validation(
            "Missing required parameter: userId".to_string(),
        )),
    }
}

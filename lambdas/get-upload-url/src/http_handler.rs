use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;
use vfs_shared::{
    cdn, claims,
    error::ApiError,
    files,
    respond::{self, Cors},
    types::UploadUrlRequest,
    AppState,
};

const CORS: Cors = Cors::new("POST,OPTIONS");

/// Returns a time-limited upload URL for a key the caller is allowed to
/// write. The signed request carries the uploader and timestamp as object
/// metadata.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!("get-upload-url invoked: {} {}", event.method(), event.uri().path());

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::POST {
        return respond::method_not_allowed(CORS);
    }

    let identity = match claims::extract_identity(&event) {
        Ok(identity) => identity,
        Err(err) => return respond::error(CORS, &err),
    };

    let request: UploadUrlRequest = match serde_json::from_slice(event.body()) {
        Ok(request) => request,
        Err(e) => {
            return respond::error(
                CORS,
                &ApiError::Validation(format!("Invalid request body: {}", e)),
            )
        }
    };

    let host = cdn::request_host(&event);
    match files::fetch_upload_url(
        &state,
        &identity,
        &request.file_key,
        &request.content_type,
        &host,
    )
    .await
    {
        Ok(signed) => respond::json(CORS, StatusCode::OK, &signed),
        Err(err) => respond::error(CORS, &err),
    }
}

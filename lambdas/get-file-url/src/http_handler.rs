use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use vfs_shared::{
    cdn, claims,
    error::ApiError,
    files,
    respond::{self, Cors},
    types::FileUrlRequest,
    AppState,
};

const CORS: Cors = Cors::new("GET,POST,OPTIONS");

/// Returns a time-limited download URL for a stored file the caller owns.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!("get-file-url invoked: {} {}", event.method(), event.uri().path());

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::GET && event.method() != Method::POST {
        return respond::method_not_allowed(CORS);
    }

    let identity = match claims::extract_identity(&event) {
        Ok(identity) => identity,
        Err(err) => return respond::error(CORS, &err),
    };

    let file_key = match file_key_from(&event) {
        Ok(key) => key,
        Err(err) => return respond::error(CORS, &err),
    };

    let host = cdn::request_host(&event);
    match files::fetch_file_url(&state, &identity, &file_key, &host).await {
        Ok(signed) => respond::json(CORS, StatusCode::OK, &signed),
        Err(err) => respond::error(CORS, &err),
    }
}

/// `fileKey` arrives as a query parameter on GET and in the JSON body on POST.
fn file_key_from(event: &Request) -> Result<String, ApiError> {
    if event.method() == Method::GET {
        return event
            .query_string_parameters_ref()
            .and_then(|params| params.first("fileKey"))
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::Validation("Missing required field: fileKey".to_string()));
    }

    let request: FileUrlRequest = serde_json::from_slice(event.body())
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;
    Ok(request.file_key)
}

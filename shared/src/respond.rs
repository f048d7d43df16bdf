//! Response shaping shared by every handler: fixed CORS headers, JSON
//! bodies, and the single place where an `ApiError` becomes an HTTP response.

use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

use crate::error::ApiError;

/// Header values every response carries. The method list is handler-specific.
#[derive(Debug, Clone, Copy)]
pub struct Cors {
    pub methods: &'static str,
}

pub const ALLOWED_HEADERS: &str =
    "Content-Type,Authorization,X-Amz-Date,X-Api-Key,X-Amz-Security-Token";

impl Cors {
    pub const fn new(methods: &'static str) -> Self {
        Self { methods }
    }
}

/// Fixed response for CORS preflight requests.
pub fn preflight(cors: Cors) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", cors.methods)
        .header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
        .body(Body::Empty)
        .map_err(Box::new)?)
}

pub fn json<T: Serialize>(
    cors: Cors,
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", cors.methods)
        .header("Access-Control-Allow-Headers", ALLOWED_HEADERS)
        .body(serde_json::to_string(body)?.into())
        .map_err(Box::new)?)
}

/// Convert a handler failure into its JSON response.
pub fn error(cors: Cors, err: &ApiError) -> Result<Response<Body>, Error> {
    json(
        cors,
        err.status(),
        &serde_json::json!({ "error": err.message() }),
    )
}

pub fn method_not_allowed(cors: Cors) -> Result<Response<Body>, Error> {
    json(
        cors,
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({"error": "Method not allowed"}),
    )
}

use lambda_http::http::StatusCode;

/// Error taxonomy shared by every handler. Each variant maps to exactly one
/// HTTP status; handlers convert at their top level so nothing propagates as
/// an unhandled fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or missing required input
    Validation(String),
    /// Missing or unparsable token
    Auth(String),
    /// Authenticated but not permitted
    Forbidden(String),
    /// Missing required deployment configuration (bucket, table name)
    Configuration(String),
    /// The underlying storage/database call failed; message is already redacted
    Dependency(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Dependency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(m)
            | ApiError::Auth(m)
            | ApiError::Forbidden(m)
            | ApiError::Configuration(m)
            | ApiError::Dependency(m) => m,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

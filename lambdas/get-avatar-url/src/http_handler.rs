use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use vfs_shared::{
    cdn,
    error::ApiError,
    files,
    respond::{self, Cors},
    AppState,
};

const CORS: Cors = Cors::new("GET,OPTIONS");

/// Returns a time-limited download URL for a user's avatar. Avatars are
/// public-readable, so the only requirement is the `userId` path parameter.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!("get-avatar-url invoked: {} {}", event.method(), event.uri().path());

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::GET {
        return respond::method_not_allowed(CORS);
    }

    let user_id = match user_id_from(&event) {
        Ok(user_id) => user_id,
        Err(err) => return respond::error(CORS, &err),
    };

    let host = cdn::request_host(&event);
    match files::fetch_avatar_url(&state, &user_id, &host).await {
        Ok(signed) => respond::json(CORS, StatusCode::OK, &signed),
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
        [.., "avatars", user_id] => Ok((*user_id).to_string()),
        _ => Err(ApiError::Validation(
            "Missing required parameter: userId".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfs_shared::config::AppConfig;

    fn test_state() -> Arc<AppState> {
        let dynamo = aws_sdk_dynamodb::Client::from_conf(
            aws_sdk_dynamodb::Config::builder()
                .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
                .region(aws_sdk_dynamodb::config::Region::new("us-east-1"))
                .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                    "test", "test", None, None, "test",
                ))
                .endpoint_url("https://127.0.0.1:1")
                .build(),
        );
        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                .region(aws_sdk_s3::config::Region::new("us-east-1"))
                .credentials_provider(aws_sdk_s3::config::Credentials::new(
                    "test", "test", None, None, "test",
                ))
                .endpoint_url("https://127.0.0.1:1")
                .build(),
        );
        AppState::new(
            dynamo,
            s3,
            AppConfig {
                bucket: "vfs-tracker-storage".to_string(),
                events_table: "VoiceFemEvents".to_string(),
                profiles_table: "VoiceFemUserProfile".to_string(),
                sessions_table: "VoiceFemSessions".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_preflight() {
        let mut request = Request::default();
        *request.method_mut() = Method::OPTIONS;

        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], "GET,OPTIONS");
    }

    #[tokio::test]
    async fn test_avatar_is_public_read() {
        // No Authorization header on purpose
        let request = lambda_http::http::Request::builder()
            .method("GET")
            .uri("/avatars/u2")
            .body(Body::Empty)
            .unwrap();

        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&response.body().to_vec()).unwrap();
        assert_eq!(json["expiresIn"], 86400);
        let url = json["url"].as_str().unwrap();
        assert!(url.starts_with("https://storage.vfs-tracker.app/"));
        assert!(url.contains("avatars/u2/avatar"));
    }

    #[tokio::test]
    async fn test_missing_user_id_is_400() {
        let request = lambda_http::http::Request::builder()
            .method("GET")
            .uri("/avatars")
            .body(Body::Empty)
            .unwrap();

        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

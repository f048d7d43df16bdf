use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;
use vfs_shared::{
    events,
    respond::{self, Cors},
    AppState,
};

const CORS: Cors = Cors::new("GET,OPTIONS");

/// Public dashboard feed: approved events only, in their stripped
/// projection, newest first. No authentication.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!("get-all-events invoked: {} {}", event.method(), event.uri().path());

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::GET {
        return respond::method_not_allowed(CORS);
    }

    match events::list_public_events(&state).await {
        Ok(events) => respond::json(CORS, StatusCode::OK, &serde_json::json!({ "events": events })),
        Err(err) => respond::error(CORS, &err),
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
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_unknown_method_is_405() {
        let mut request = Request::default();
        *request.method_mut() = Method::POST;

        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

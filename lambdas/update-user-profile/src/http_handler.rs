use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use vfs_shared::{
    authz, claims,
    error::ApiError,
    profile,
    respond::{self, Cors},
    types::UpdateProfileRequest,
    AppState,
};

const CORS: Cors = Cors::new("PUT,OPTIONS");

/// Overwrites the caller's own profile. The nickname is owned by the
/// identity provider: client-submitted values are discarded and the response
/// always carries the nickname from the token.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!(
        "update-user-profile invoked: {} {}",
        event.method(),
        event.uri().path()
    );

    if event.method() == Method::OPTIONS {
        return respond::preflight(CORS);
    }
    if event.method() != Method::PUT {
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

    let request: UpdateProfileRequest = match serde_json::from_slice(event.body()) {
        Ok(request) => request,
        Err(e) => {
            return respond::error(
                CORS,
                &ApiError::Validation(format!("Invalid request body: {}", e)),
            )
        }
    };

    if let Err(err) = authz::require_owner(&user_id, &identity.user_id) {
        return respond::error(CORS, &err);
    }

    match profile::update_profile(&state, &identity, request.profile).await {
        Ok(record) => respond::json(CORS, StatusCode::OK, &record),
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
        [.., "profile", user_id] => Ok((*user_id).to_string()),
        _ => Err(ApiError::Validation(
            "Missing required parameter: userId".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
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

    fn bearer_for(user_id: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"sub": user_id, "token_use": "id", "nickname": "RealNick"})
                .to_string()
                .as_bytes(),
        );
        format!("Bearer {}.{}.signature", header, payload)
    }

    fn put_request(caller: &str, path_user: &str, body: &str) -> Request {
        let mut request = lambda_http::http::Request::builder()
            .method("PUT")
            .uri(format!("/profile/{}", path_user))
            .body(Body::from(body.to_string()))
            .unwrap();
        request
            .headers_mut()
            .insert("Authorization", bearer_for(caller).parse().unwrap());
        request
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let request = lambda_http::http::Request::builder()
            .method("PUT")
            .uri("/profile/u1")
            .body(Body::from(r#"{"profile": {}}"#))
            .unwrap();

        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_updating_someone_else_is_403() {
        let request = put_request("u-b", "u-a", r#"{"profile": {"pronouns": "she/her"}}"#);
        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_profile_field_is_400() {
        let request = put_request("u1", "u1", r#"{"settings": {}}"#);
        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&response.body().to_vec()).unwrap();
        assert!(json["error"].as_str().unwrap().contains("profile"));
    }

    #[tokio::test]
    async fn test_non_object_profile_is_400() {
        // Rejected by validation before any write is attempted.
        let request = put_request("u1", "u1", r#"{"profile": "not an object"}"#);
        let response = function_handler(request, test_state()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

use crate::error::ApiError;
use std::env;

/// Deployment configuration, resolved once at cold start and threaded into
/// handlers through `AppState` instead of being read from the environment on
/// every invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bucket: String,
    pub events_table: String,
    pub profiles_table: String,
    pub sessions_table: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        let bucket = env::var("BUCKET")
            .map_err(|_| ApiError::Configuration("BUCKET must be set".to_string()))?;

        Ok(Self {
            bucket,
            events_table: env::var("EVENTS_TABLE")
                .unwrap_or_else(|_| "VoiceFemEvents".to_string()),
            profiles_table: env::var("PROFILES_TABLE")
                .unwrap_or_else(|_| "VoiceFemUserProfile".to_string()),
            sessions_table: env::var("SESSIONS_TABLE")
                .unwrap_or_else(|_| "VoiceFemSessions".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bucket_is_configuration_error() {
        env::remove_var("BUCKET");
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            ApiError::Configuration("BUCKET must be set".to_string())
        );

        env::set_var("BUCKET", "vfs-tracker-storage");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bucket, "vfs-tracker-storage");
        assert_eq!(config.events_table, "VoiceFemEvents");
        env::remove_var("BUCKET");
    }
}

pub mod authz;
pub mod cdn;
pub mod claims;
pub mod config;
pub mod dynamo;
pub mod error;
pub mod events;
pub mod files;
pub mod profile;
pub mod respond;
pub mod sessions;
pub mod types;

use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub s3_client: S3Client,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(dynamo_client: DynamoClient, s3_client: S3Client, config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            dynamo_client,
            s3_client,
            config,
        })
    }
}

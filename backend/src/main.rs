use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use image_upload::{
    server,
    storage::GcsStorage,
    types::Environment,
    upload::{ImageUploader, SystemClock},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().as_str()));

    // JSON logs for staging/production, human-readable for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let bucket_name = environment.bucket_name();
    tracing::info!(
        project_id = %environment.project_id(),
        bucket = %bucket_name,
        endpoint = %environment.storage_endpoint_url(),
        "Initializing storage client"
    );

    let s3_client = Arc::new(S3Client::from_conf(
        environment.storage_client_config().await?,
    ));
    let storage = Arc::new(GcsStorage::new(s3_client, bucket_name));
    let uploader = Arc::new(ImageUploader::new(storage, Arc::new(SystemClock)));

    server::start(environment, uploader).await
}

//! Environment configuration for different deployment stages

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use tracing::Level;

use crate::storage::{load_hmac_credentials, PUBLIC_URL_BASE};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEV_BUCKET_NAME: &str = "image-uploads";
const DEV_PROJECT_ID: &str = "local-development";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (storage endpoint may point at a local emulator)
    Development {
        /// Optional override for the storage XML endpoint
        storage_endpoint_override: Option<String>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development {
                storage_endpoint_override: env::var("STORAGE_ENDPOINT_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
            },
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the cloud project identifier
    ///
    /// # Panics
    ///
    /// Panics if `GOOGLE_CLOUD_PROJECT_ID` is not set outside development
    #[must_use]
    pub fn project_id(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("GOOGLE_CLOUD_PROJECT_ID")
                .expect("GOOGLE_CLOUD_PROJECT_ID environment variable is not set"),
            Self::Development { .. } => {
                env::var("GOOGLE_CLOUD_PROJECT_ID").unwrap_or_else(|_| DEV_PROJECT_ID.to_string())
            }
        }
    }

    /// Returns the bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if `GOOGLE_CLOUD_BUCKET_NAME` is not set outside development
    #[must_use]
    pub fn bucket_name(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("GOOGLE_CLOUD_BUCKET_NAME")
                .expect("GOOGLE_CLOUD_BUCKET_NAME environment variable is not set"),
            Self::Development { .. } => env::var("GOOGLE_CLOUD_BUCKET_NAME")
                .unwrap_or_else(|_| DEV_BUCKET_NAME.to_string()),
        }
    }

    /// Location of the HMAC key file used to sign storage requests
    ///
    /// Development may omit it, in which case the default credential chain is used.
    ///
    /// # Panics
    ///
    /// Panics if `SERVICE_ACCOUNT_KEY_PATH` is not set outside development
    #[must_use]
    pub fn credentials_path(&self) -> Option<PathBuf> {
        match self {
            Self::Production | Self::Staging => Some(PathBuf::from(
                env::var("SERVICE_ACCOUNT_KEY_PATH")
                    .expect("SERVICE_ACCOUNT_KEY_PATH environment variable is not set"),
            )),
            Self::Development { .. } => env::var("SERVICE_ACCOUNT_KEY_PATH").ok().map(PathBuf::from),
        }
    }

    /// Returns the storage XML endpoint
    #[must_use]
    pub fn storage_endpoint_url(&self) -> &str {
        match self {
            Self::Production
            | Self::Staging
            | Self::Development {
                storage_endpoint_override: None,
            } => PUBLIC_URL_BASE,
            Self::Development {
                storage_endpoint_override: Some(url),
            } => url.as_str(),
        }
    }

    /// Port the HTTP server listens on
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn port(&self) -> anyhow::Result<u16> {
        Ok(env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.trim().parse())?)
    }

    /// Deadline applied to each HTTP request
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Storage client configuration
    ///
    /// Requests go to the XML interoperability endpoint with path-style
    /// addressing. SDK retries are disabled; a failed call is reported as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the HMAC key file cannot be loaded
    pub async fn storage_client_config(&self) -> anyhow::Result<aws_sdk_s3::Config> {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("auto"))
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeout_config);

        if let Some(path) = self.credentials_path() {
            loader = loader.credentials_provider(load_hmac_credentials(&path)?);
        }

        let sdk_config = loader.load().await;

        // The XML API rejects the SDK's default flexible checksums
        Ok(aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(self.storage_endpoint_url())
            .force_path_style(true)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build())
    }

    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development { .. } => Level::DEBUG,
            })
    }
}

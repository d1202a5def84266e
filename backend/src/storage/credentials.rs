//! HMAC key loading for the storage interoperability API

use std::path::Path;

use aws_sdk_s3::config::Credentials;
use serde::Deserialize;

use super::{StoreError, StoreResult};

const PROVIDER_NAME: &str = "gcs-hmac-key";

/// HMAC key file as written by `gcloud storage hmac create --format=json`
#[derive(Debug, Deserialize)]
struct HmacKeyFile {
    metadata: HmacKeyMetadata,
    secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HmacKeyMetadata {
    access_id: String,
}

/// Reads the HMAC key file at `path` and turns it into request-signing credentials
///
/// # Errors
///
/// Returns `StoreError::ConfigError` if the file cannot be read or is not a valid key file
pub fn load_hmac_credentials(path: &Path) -> StoreResult<Credentials> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        StoreError::ConfigError(format!("Failed to read key file {}: {e}", path.display()))
    })?;

    parse_hmac_credentials(&raw)
}

fn parse_hmac_credentials(raw: &str) -> StoreResult<Credentials> {
    let key: HmacKeyFile = serde_json::from_str(raw)
        .map_err(|e| StoreError::ConfigError(format!("Invalid key file: {e}")))?;

    if key.metadata.access_id.is_empty() || key.secret.is_empty() {
        return Err(StoreError::ConfigError(
            "Key file is missing the access id or secret".to_string(),
        ));
    }

    Ok(Credentials::new(
        key.metadata.access_id,
        key.secret,
        None,
        None,
        PROVIDER_NAME,
    ))
}

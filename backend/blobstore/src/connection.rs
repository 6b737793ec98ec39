//! Storage connection-string parsing.
//!
//! Accepts the `key=value;key=value` format the platform injects as
//! `AzureWebJobsStorage`, including the `UseDevelopmentStorage=true`
//! shortcut for the local Azurite emulator.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use url::Url;

/// Azurite's well-known development account.
const DEV_ACCOUNT: &str = "devstoreaccount1";
const DEV_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection string is missing \"{0}\"")]
    MissingField(&'static str),

    #[error("AccountKey is not valid base64: {0}")]
    InvalidAccountKey(String),

    #[error("blob endpoint is not a valid URL: {0}")]
    InvalidEndpoint(String),
}

/// Parsed storage account settings.
#[derive(Debug, Clone)]
pub struct StorageConnection {
    pub account: String,
    /// Decoded account key bytes for HMAC signing.
    pub key: Vec<u8>,
    /// Blob service endpoint, no trailing slash. Includes a path component
    /// for emulator-style endpoints.
    pub blob_endpoint: String,
    /// `/{account}{endpoint path}` — prefix of every canonicalized resource.
    pub resource_prefix: String,
}

impl StorageConnection {
    pub fn parse(conn: &str) -> Result<Self, ConnectionError> {
        let fields: HashMap<&str, &str> = conn
            .split(';')
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.split_once('='))
            .collect();

        if fields.get("UseDevelopmentStorage") == Some(&"true") {
            return Self::build(DEV_ACCOUNT, DEV_KEY, DEV_BLOB_ENDPOINT.to_string());
        }

        let account = fields
            .get("AccountName")
            .copied()
            .ok_or(ConnectionError::MissingField("AccountName"))?;
        let key = fields
            .get("AccountKey")
            .copied()
            .ok_or(ConnectionError::MissingField("AccountKey"))?;

        let blob_endpoint = match fields.get("BlobEndpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let protocol = fields.get("DefaultEndpointsProtocol").unwrap_or(&"https");
                let suffix = fields.get("EndpointSuffix").unwrap_or(&"core.windows.net");
                format!("{protocol}://{account}.blob.{suffix}")
            }
        };

        Self::build(account, key, blob_endpoint)
    }

    fn build(account: &str, key_b64: &str, blob_endpoint: String) -> Result<Self, ConnectionError> {
        let key = BASE64
            .decode(key_b64)
            .map_err(|e| ConnectionError::InvalidAccountKey(e.to_string()))?;

        let parsed = Url::parse(&blob_endpoint)
            .map_err(|e| ConnectionError::InvalidEndpoint(e.to_string()))?;
        let endpoint_path = parsed.path().trim_end_matches('/');
        let resource_prefix = format!("/{account}{endpoint_path}");

        Ok(Self {
            account: account.to_string(),
            key,
            blob_endpoint,
            resource_prefix,
        })
    }
}

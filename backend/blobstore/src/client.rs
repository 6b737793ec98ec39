//! Put Blob client for the evidence container.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info};

use evidex_core::{EvidenceStore, ExtractError};

use crate::connection::{ConnectionError, StorageConnection};
use crate::signing;

/// Service version pinned for Shared Key signing.
const STORAGE_API_VERSION: &str = "2021-08-06";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Blob Storage client scoped to one destination container.
///
/// `put` issues a Put Blob, which replaces any existing blob of the same
/// name — the unconditional overwrite the handler relies on.
pub struct BlobStoreClient {
    http: Client,
    conn: StorageConnection,
    container: String,
}

impl BlobStoreClient {
    pub fn new(connection_string: &str, container: impl Into<String>) -> Result<Self, ConnectionError> {
        Ok(Self {
            http: Client::new(),
            conn: StorageConnection::parse(connection_string)?,
            container: container.into(),
        })
    }

    fn blob_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.conn.blob_endpoint,
            self.container,
            urlencoding::encode(name)
        )
    }

    fn canonical_resource(&self, name: &str) -> String {
        format!("{}/{}/{}", self.conn.resource_prefix, self.container, name)
    }
}

#[async_trait]
impl EvidenceStore for BlobStoreClient {
    async fn put(&self, name: &str, content: &str) -> Result<(), ExtractError> {
        let url = self.blob_url(name);
        let body = content.as_bytes().to_vec();
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        let ms_headers: [(&str, &str); 3] = [
            ("x-ms-blob-type", "BlockBlob"),
            ("x-ms-date", &date),
            ("x-ms-version", STORAGE_API_VERSION),
        ];
        let string_to_sign = signing::string_to_sign(
            "PUT",
            body.len(),
            TEXT_CONTENT_TYPE,
            &ms_headers,
            &self.canonical_resource(name),
        );
        let authorization =
            signing::authorization(&self.conn.account, &self.conn.key, &string_to_sign);

        debug!("[BlobStore] PUT {}", url);
        let mut request = self
            .http
            .put(&url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, TEXT_CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len());
        for (header, value) in ms_headers {
            request = request.header(header, value);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| ExtractError::store(format!("upload transport error: {e}"), true))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExtractError::store(
                format!("blob service returned {status}: {detail}"),
                ExtractError::status_is_retryable(status.as_u16()),
            ));
        }

        info!(
            "[BlobStore] Wrote {}/{} ({} chars)",
            self.container,
            name,
            content.chars().count()
        );
        Ok(())
    }
}

//! Submit-and-poll client for the document analysis REST surface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info};

use evidex_core::{AnalysisLine, AnalysisPage, AnalysisResult, DocumentAnalyzer, ExtractError};

use crate::identity;

/// Prebuilt model for fast plain-text extraction (no structural layout).
pub const READ_MODEL: &str = "prebuilt-read";
const API_VERSION: &str = "2023-07-31";
/// Poll cadence when the service sends no Retry-After.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How the client authenticates against the analysis resource.
pub enum DocIntCredential {
    /// `Ocp-Apim-Subscription-Key` header.
    Key(String),
    /// Bearer token from the instance metadata service.
    ManagedIdentity,
}

/// Client for one Document Intelligence resource.
///
/// Built without a request timeout: the analyze operation is awaited until
/// the service reports a terminal status, under the platform's invocation
/// wall-clock.
pub struct DocIntClient {
    http: Client,
    endpoint: String,
    credential: DocIntCredential,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    analyze_result: Option<WireAnalyzeResult>,
    error: Option<WireError>,
}

#[derive(Deserialize)]
struct WireAnalyzeResult {
    #[serde(default)]
    pages: Vec<WirePage>,
}

#[derive(Deserialize)]
struct WirePage {
    #[serde(default)]
    lines: Vec<WireLine>,
}

#[derive(Deserialize)]
struct WireLine {
    content: String,
}

#[derive(Deserialize)]
struct WireError {
    code: Option<String>,
    message: Option<String>,
}

impl WireError {
    fn describe(&self) -> String {
        format!(
            "{}: {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("no detail")
        )
    }
}

impl From<WireAnalyzeResult> for AnalysisResult {
    fn from(wire: WireAnalyzeResult) -> Self {
        Self {
            pages: wire
                .pages
                .into_iter()
                .map(|page| AnalysisPage {
                    lines: page
                        .lines
                        .into_iter()
                        .map(|line| AnalysisLine {
                            content: line.content,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl DocIntClient {
    pub fn new(endpoint: impl Into<String>, credential: DocIntCredential) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            credential,
        }
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ExtractError> {
        match &self.credential {
            DocIntCredential::Key(key) => Ok(request.header("Ocp-Apim-Subscription-Key", key)),
            DocIntCredential::ManagedIdentity => {
                let token = identity::fetch_token(&self.http).await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn submit(&self, content: &[u8]) -> Result<String, ExtractError> {
        let url = format!(
            "{}/formrecognizer/documentModels/{READ_MODEL}:analyze?api-version={API_VERSION}",
            self.endpoint
        );
        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content.to_vec());
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| ExtractError::analyze(format!("analyze transport error: {e}"), true))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExtractError::analyze(
                format!("analyze request returned {status}: {detail}"),
                ExtractError::status_is_retryable(status.as_u16()),
            ));
        }

        response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ExtractError::analyze("analyze response missing Operation-Location", false)
            })
    }

    async fn poll(&self, operation_url: &str) -> Result<AnalysisResult, ExtractError> {
        loop {
            let request = self.http.get(operation_url);
            let response = self
                .authorize(request)
                .await?
                .send()
                .await
                .map_err(|e| ExtractError::analyze(format!("poll transport error: {e}"), true))?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(ExtractError::analyze(
                    format!("poll returned {status}: {detail}"),
                    ExtractError::status_is_retryable(status.as_u16()),
                ));
            }

            let wait = retry_after(&response).unwrap_or(DEFAULT_POLL_INTERVAL);
            let operation: AnalyzeOperation = response.json().await.map_err(|e| {
                ExtractError::analyze(format!("malformed operation payload: {e}"), false)
            })?;

            match operation.status.as_str() {
                "succeeded" => {
                    return Ok(operation
                        .analyze_result
                        .map(AnalysisResult::from)
                        .unwrap_or_default());
                }
                "failed" => {
                    let detail = operation
                        .error
                        .map(|e| e.describe())
                        .unwrap_or_else(|| "no error detail".to_string());
                    return Err(ExtractError::analyze(
                        format!("analysis rejected the document: {detail}"),
                        false,
                    ));
                }
                other => {
                    debug!("[DocInt] Operation {}, polling again in {:?}", other, wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[async_trait]
impl DocumentAnalyzer for DocIntClient {
    async fn analyze_read(&self, content: &[u8]) -> Result<AnalysisResult, ExtractError> {
        info!(
            "[DocInt] Submitting {} bytes to {}",
            content.len(),
            READ_MODEL
        );
        let operation_url = self.submit(content).await?;
        let result = self.poll(&operation_url).await?;
        info!("[DocInt] Analysis complete: {} page(s)", result.pages.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_succeeded_operation() {
        let payload = r#"{
            "status": "succeeded",
            "createdDateTime": "2024-01-01T00:00:00Z",
            "analyzeResult": {
                "apiVersion": "2023-07-31",
                "modelId": "prebuilt-read",
                "content": "Total: $50\nDate: 2024-01-01",
                "pages": [{
                    "pageNumber": 1,
                    "lines": [
                        {"content": "Total: $50", "spans": [{"offset": 0, "length": 10}]},
                        {"content": "Date: 2024-01-01"}
                    ]
                }]
            }
        }"#;
        let operation: AnalyzeOperation = serde_json::from_str(payload).unwrap();
        assert_eq!(operation.status, "succeeded");
        let result = AnalysisResult::from(operation.analyze_result.unwrap());
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages[0].lines[1].content, "Date: 2024-01-01");
    }

    #[test]
    fn parses_running_operation_without_result() {
        let operation: AnalyzeOperation =
            serde_json::from_str(r#"{"status": "running"}"#).unwrap();
        assert_eq!(operation.status, "running");
        assert!(operation.analyze_result.is_none());
    }

    #[test]
    fn parses_failure_detail() {
        let payload = r#"{
            "status": "failed",
            "error": {"code": "InvalidContent", "message": "The file is corrupted."}
        }"#;
        let operation: AnalyzeOperation = serde_json::from_str(payload).unwrap();
        let detail = operation.error.unwrap().describe();
        assert_eq!(detail, "InvalidContent: The file is corrupted.");
    }

    #[test]
    fn pages_without_lines_deserialize_empty() {
        let payload = r#"{"status": "succeeded", "analyzeResult": {"pages": [{"pageNumber": 1}]}}"#;
        let operation: AnalyzeOperation = serde_json::from_str(payload).unwrap();
        let result = AnalysisResult::from(operation.analyze_result.unwrap());
        assert!(result.has_no_lines());
    }
}

//! Custom-handler invocation envelope.
//!
//! The host delivers each trigger as JSON: bound inputs under `Data`
//! (binary payloads base64-encoded) and trigger metadata under `Metadata`.
//! Metadata values are themselves JSON-serialized, so strings may arrive
//! wrapped in an extra layer of quotes.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use evidex_core::{BlobEvent, ExtractError};

/// Name of the blob input binding in `EvidenceExtract/function.json`.
pub const INPUT_BINDING: &str = "inputBlob";

#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    #[serde(rename = "Data", default)]
    pub data: HashMap<String, Value>,
    #[serde(rename = "Metadata", default)]
    pub metadata: HashMap<String, Value>,
}

impl InvocationRequest {
    /// Decode the bound blob into a [`BlobEvent`].
    pub fn blob_event(&self) -> Result<BlobEvent, ExtractError> {
        let path = self
            .metadata
            .get("BlobTrigger")
            .and_then(metadata_string)
            .ok_or_else(|| {
                ExtractError::BadTrigger("metadata is missing the BlobTrigger path".into())
            })?;

        let bound = self.data.get(INPUT_BINDING).ok_or_else(|| {
            ExtractError::BadTrigger(format!("no \"{INPUT_BINDING}\" input in Data"))
        })?;
        let encoded = bound.as_str().ok_or_else(|| {
            ExtractError::BadTrigger(format!("\"{INPUT_BINDING}\" is not a base64 string"))
        })?;
        let content = BASE64.decode(encoded).map_err(|e| {
            ExtractError::BadTrigger(format!("blob content is not valid base64: {e}"))
        })?;

        Ok(BlobEvent::new(path, content))
    }
}

/// A metadata string, unwrapping the host's extra JSON quoting when present.
fn metadata_string(value: &Value) -> Option<String> {
    let s = value.as_str()?;
    let unquoted = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s);
    Some(unquoted.to_string())
}

/// Reply the host expects from a completed invocation.
#[derive(Debug, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "Outputs")]
    pub outputs: Value,
    #[serde(rename = "Logs")]
    pub logs: Vec<String>,
    #[serde(rename = "ReturnValue")]
    pub return_value: Option<Value>,
}

impl InvocationResponse {
    pub fn success(logs: Vec<String>) -> Self {
        Self {
            outputs: Value::Object(Default::default()),
            logs,
            return_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(body: Value) -> InvocationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn decodes_a_blob_invocation() {
        let request = invocation(json!({
            "Data": { "inputBlob": "JVBERi0xLjc=" },
            "Metadata": {
                "BlobTrigger": "uploads/invoice.pdf",
                "Uri": "https://acct.blob.core.windows.net/uploads/invoice.pdf",
                "Properties": { "ContentLength": 8 },
                "sys": { "MethodName": "EvidenceExtract" }
            }
        }));

        let event = request.blob_event().unwrap();
        assert_eq!(event.path, "uploads/invoice.pdf");
        assert_eq!(event.content, b"%PDF-1.7");
    }

    #[test]
    fn unwraps_json_quoted_metadata() {
        let request = invocation(json!({
            "Data": { "inputBlob": "" },
            "Metadata": { "BlobTrigger": "\"uploads/invoice.pdf\"" }
        }));

        let event = request.blob_event().unwrap();
        assert_eq!(event.path, "uploads/invoice.pdf");
    }

    #[test]
    fn missing_trigger_path_is_a_bad_trigger() {
        let request = invocation(json!({
            "Data": { "inputBlob": "AAAA" },
            "Metadata": {}
        }));

        let err = request.blob_event().unwrap_err();
        assert!(matches!(err, ExtractError::BadTrigger(_)));
        assert!(!err.retryable());
    }

    #[test]
    fn missing_binding_is_a_bad_trigger() {
        let request = invocation(json!({
            "Metadata": { "BlobTrigger": "uploads/x.pdf" }
        }));

        assert!(request.blob_event().is_err());
    }

    #[test]
    fn garbage_base64_is_a_bad_trigger() {
        let request = invocation(json!({
            "Data": { "inputBlob": "not//valid==base64!!" },
            "Metadata": { "BlobTrigger": "uploads/x.pdf" }
        }));

        assert!(matches!(
            request.blob_event(),
            Err(ExtractError::BadTrigger(_))
        ));
    }

    #[test]
    fn success_reply_has_the_expected_shape() {
        let reply = InvocationResponse::success(vec!["wrote invoice.txt".into()]);
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            json!({
                "Outputs": {},
                "Logs": ["wrote invoice.txt"],
                "ReturnValue": null
            })
        );
    }
}

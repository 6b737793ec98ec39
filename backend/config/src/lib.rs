//! `evidex-config` — runtime configuration for the extraction function host.
//!
//! Reads the same environment surface the function app exposes, validated
//! eagerly at process start so a misconfigured host fails before it accepts
//! a single invocation.

pub mod redact;

use std::collections::HashMap;

use thiserror::Error;

/// Destination container used when `EVIDENCE_CONTAINER` is unset.
pub const DEFAULT_EVIDENCE_CONTAINER: &str = "evidence";

/// Error raised for missing or unusable required configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required env var \"{0}\" is not set")]
    MissingVar(&'static str),

    #[error("env var \"{0}\" is set but empty")]
    EmptyVar(&'static str),
}

/// Validated process configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the document-analysis resource, trailing slash stripped.
    pub docint_endpoint: String,
    /// Optional API key for the analysis service; managed identity is used
    /// when absent.
    pub docint_key: Option<String>,
    /// Storage connection string for the account hosting both containers.
    pub storage_connection: String,
    /// Destination container for extracted text.
    pub evidence_container: String,
}

impl AppConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from a provided map (useful for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let docint_endpoint = required(vars, "DOCINT_ENDPOINT")?
            .trim_end_matches('/')
            .to_string();
        let storage_connection = required(vars, "AzureWebJobsStorage")?.to_string();
        let evidence_container = optional(vars, "EVIDENCE_CONTAINER")
            .unwrap_or_else(|| DEFAULT_EVIDENCE_CONTAINER.to_string());
        let docint_key = optional(vars, "DOCINT_KEY");

        Ok(Self {
            docint_endpoint,
            docint_key,
            storage_connection,
            evidence_container,
        })
    }

    /// One-line summary with secrets masked, for the startup log.
    pub fn redacted_summary(&self) -> String {
        format!(
            "endpoint={} key={} storage=\"{}\" container={}",
            self.docint_endpoint,
            self.docint_key
                .as_deref()
                .map(redact::mask)
                .unwrap_or_else(|| "<managed identity>".to_string()),
            redact::redact_connection_string(&self.storage_connection),
            self.evidence_container,
        )
    }
}

fn required<'a>(
    vars: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, ConfigError> {
    match vars.get(name) {
        None => Err(ConfigError::MissingVar(name)),
        Some(v) if v.is_empty() => Err(ConfigError::EmptyVar(name)),
        Some(v) => Ok(v.as_str()),
    }
}

fn optional(vars: &HashMap<String, String>, name: &str) -> Option<String> {
    vars.get(name).filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            ("DOCINT_ENDPOINT", "https://res.cognitiveservices.azure.com"),
            ("AzureWebJobsStorage", "AccountName=acct;AccountKey=a2V5"),
        ])
    }

    #[test]
    fn loads_minimal_config() {
        let config = AppConfig::from_vars(&minimal()).unwrap();
        assert_eq!(
            config.docint_endpoint,
            "https://res.cognitiveservices.azure.com"
        );
        assert_eq!(config.evidence_container, "evidence");
        assert!(config.docint_key.is_none());
    }

    #[test]
    fn strips_trailing_slash_from_endpoint() {
        let mut v = minimal();
        v.insert(
            "DOCINT_ENDPOINT".into(),
            "https://res.cognitiveservices.azure.com/".into(),
        );
        let config = AppConfig::from_vars(&v).unwrap();
        assert_eq!(
            config.docint_endpoint,
            "https://res.cognitiveservices.azure.com"
        );
    }

    #[test]
    fn missing_endpoint_is_a_named_error() {
        let mut v = minimal();
        v.remove("DOCINT_ENDPOINT");
        let err = AppConfig::from_vars(&v).unwrap_err();
        assert!(err.to_string().contains("DOCINT_ENDPOINT"));
    }

    #[test]
    fn empty_storage_connection_is_rejected() {
        let mut v = minimal();
        v.insert("AzureWebJobsStorage".into(), String::new());
        let err = AppConfig::from_vars(&v).unwrap_err();
        assert!(err.to_string().contains("AzureWebJobsStorage"));
    }

    #[test]
    fn container_override_applies() {
        let mut v = minimal();
        v.insert("EVIDENCE_CONTAINER".into(), "proof".into());
        let config = AppConfig::from_vars(&v).unwrap();
        assert_eq!(config.evidence_container, "proof");
    }

    #[test]
    fn summary_masks_the_account_key() {
        let config = AppConfig::from_vars(&minimal()).unwrap();
        let summary = config.redacted_summary();
        assert!(!summary.contains("a2V5"));
        assert!(summary.contains("container=evidence"));
    }
}

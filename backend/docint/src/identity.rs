//! Managed-identity tokens from the Azure instance metadata service.

use reqwest::Client;
use serde::Deserialize;

use evidex_core::ExtractError;

const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2018-02-01";
const COGNITIVE_RESOURCE: &str = "https://cognitiveservices.azure.com/";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Fetch a bearer token for the cognitive-services resource.
///
/// Only reachable from inside Azure; callers that cannot use managed
/// identity configure an API key instead.
pub(crate) async fn fetch_token(http: &Client) -> Result<String, ExtractError> {
    let response = http
        .get(IMDS_TOKEN_URL)
        .query(&[
            ("api-version", IMDS_API_VERSION),
            ("resource", COGNITIVE_RESOURCE),
        ])
        .header("Metadata", "true")
        .send()
        .await
        .map_err(|e| {
            ExtractError::analyze(format!("managed identity token request failed: {e}"), true)
        })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(ExtractError::analyze(
            format!("managed identity token endpoint returned {status}: {detail}"),
            ExtractError::status_is_retryable(status.as_u16()),
        ));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        ExtractError::analyze(format!("malformed token response: {e}"), false)
    })?;
    Ok(token.access_token)
}

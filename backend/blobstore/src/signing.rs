//! Shared Key authorization for blob requests.
//!
//! Builds the 2015-02-21+ string-to-sign (empty Content-Length for
//! zero-length bodies) and signs it with HMAC-SHA256 over the decoded
//! account key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Sort and fold `x-ms-*` headers into their canonical `name:value\n` form.
pub(crate) fn canonicalized_headers(ms_headers: &[(&str, &str)]) -> String {
    let mut headers: Vec<(String, &str)> = ms_headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), *value))
        .collect();
    headers.sort();
    headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect()
}

/// String-to-sign for a blob request carrying only the standard headers we
/// send (no MD5, no conditional headers, no range).
pub(crate) fn string_to_sign(
    method: &str,
    content_length: usize,
    content_type: &str,
    ms_headers: &[(&str, &str)],
    canonical_resource: &str,
) -> String {
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };
    format!(
        "{method}\n\n\n{length}\n\n{content_type}\n\n\n\n\n\n\n{headers}{canonical_resource}",
        headers = canonicalized_headers(ms_headers),
    )
}

/// `Authorization: SharedKey {account}:{signature}` header value.
pub(crate) fn authorization(account: &str, key: &[u8], string_to_sign: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());
    format!("SharedKey {account}:{signature}")
}

//! Masking of secret config values for logs and diagnostics.

/// Secret-bearing fields inside a storage connection string.
static SECRET_FIELDS: &[&str] = &["AccountKey", "SharedAccessSignature"];

/// Mask a secret value, keeping a short prefix as a hint.
pub fn mask(value: &str) -> String {
    if value.len() > 4 {
        format!("{}***", &value[..4])
    } else {
        "***".to_string()
    }
}

/// Redact secret fields inside a `key=value;key=value` connection string.
pub fn redact_connection_string(conn: &str) -> String {
    conn.split(';')
        .map(|part| match part.split_once('=') {
            Some((key, value))
                if SECRET_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(key)) =>
            {
                format!("{}={}", key, mask(value))
            }
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_account_key_only() {
        let conn = "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=c2VjcmV0a2V5";
        let redacted = redact_connection_string(conn);
        assert!(redacted.contains("AccountName=acct"));
        assert!(!redacted.contains("c2VjcmV0a2V5"));
        assert!(redacted.contains("AccountKey=c2Vj***"));
    }

    #[test]
    fn short_values_fully_masked() {
        assert_eq!(mask("abc"), "***");
    }

    #[test]
    fn passthrough_without_secrets() {
        let conn = "UseDevelopmentStorage=true";
        assert_eq!(redact_connection_string(conn), conn);
    }
}

//! Redacts credential-bearing headers before a webhook delivery is
//! persisted. The payload body is kept verbatim; only headers are touched.

use std::collections::HashMap;

const REDACTED: &str = "***REDACTED***";

const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "x-api-key",
    "x-secret-key",
    "cookie",
    "x-hub-signature",
    "x-hub-signature-256",
];

/// Redacts the fixed sensitive-header set plus `extra_signature_header`
/// (the per-source configured signature header), case-insensitively.
pub fn sanitize_headers(headers: &HashMap<String, String>, extra_signature_header: &str) -> HashMap<String, String> {
    let extra_lower = extra_signature_header.to_ascii_lowercase();

    headers
        .iter()
        .map(|(key, value)| {
            let lower = key.to_ascii_lowercase();
            if SENSITIVE_HEADERS.contains(&lower.as_str()) || lower == extra_lower {
                (key.clone(), REDACTED.to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

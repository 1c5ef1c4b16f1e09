//! Opaque page-token helpers for listing endpoints.
//!
//! Listing responses hand clients an opaque continuation token: a
//! base64-encoded JSON document describing where the next page starts. The
//! token is untrusted input on the way back in, so decoding distinguishes
//! each failure mode and preserves the underlying cause.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from decoding a client-supplied page token.
#[derive(Debug, thiserror::Error)]
pub enum PageTokenError {
    /// The token is not valid base64.
    #[error("page token is not valid base64")]
    Base64(#[from] base64::DecodeError),

    /// The token decodes to bytes that are not valid UTF-8.
    #[error("page token is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The token decodes to text that is not a valid JSON document.
    #[error("page token is not a valid JSON document")]
    Json(#[from] serde_json::Error),
}

/// Encodes a cursor value as an opaque page token.
///
/// # Errors
///
/// Returns an error when the value cannot be serialized to JSON.
pub fn serialize<T: Serialize>(cursor: &T) -> Result<String, PageTokenError> {
    let json = serde_json::to_string(cursor)?;
    Ok(STANDARD.encode(json))
}

/// Decodes an opaque page token back into a cursor value.
///
/// # Errors
///
/// Returns a [`PageTokenError`] naming the exact decode failure: bad
/// base64, bad UTF-8, or bad JSON.
pub fn deserialize<T: DeserializeOwned>(raw: &str) -> Result<T, PageTokenError> {
    let bytes = STANDARD.decode(raw)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn cursor(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    #[test]
    fn tokens_are_invertible() {
        let value = cursor(&[("foo", 1), ("bar", 2)]);
        let token = serialize(&value).expect("serialize");
        let decoded: BTreeMap<String, i64> = deserialize(&token).expect("deserialize");
        assert_eq!(decoded, value);
    }

    #[test]
    fn accepts_tokens_with_interior_whitespace() {
        // base64("{\"foo\": 1, \"bar\": 2}") as produced by other writers.
        let decoded: BTreeMap<String, i64> =
            deserialize("eyJmb28iOiAxLCAiYmFyIjogMn0=").expect("deserialize");
        assert_eq!(decoded, cursor(&[("foo", 1), ("bar", 2)]));
    }

    #[test]
    fn invalid_base64_is_reported_as_base64_error() {
        let err = deserialize::<BTreeMap<String, i64>>("foo").expect_err("must fail");
        assert!(matches!(err, PageTokenError::Base64(_)));
    }

    #[test]
    fn non_utf8_bytes_are_reported_as_utf8_error() {
        // "fooo" decodes to the bytes 7e 8a 28, which are not valid UTF-8.
        let err = deserialize::<BTreeMap<String, i64>>("fooo").expect_err("must fail");
        assert!(matches!(err, PageTokenError::Utf8(_)));
    }

    #[test]
    fn non_json_text_is_reported_as_json_error() {
        // base64("fooo")
        let err = deserialize::<BTreeMap<String, i64>>("Zm9vbw==").expect_err("must fail");
        assert!(matches!(err, PageTokenError::Json(_)));
    }
}

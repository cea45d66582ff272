//! Numeric-safe JSON codec applied to every request and response body.
//!
//! The manager reports balances and counters that do not fit in an `f64` mantissa. `serde_json`
//! is built with `arbitrary_precision`, so a [`Value`] keeps the exact digit sequence of every
//! number it decoded and writes the same digits back out.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Content type sent with every encoded request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
/// Failure to encode or decode a JSON body.
pub enum CodecError {
    /// The value could not be serialized.
    #[error("failed to encode JSON body: {0}")]
    Encode(#[source] serde_json::Error),
    /// The body was not valid JSON, or did not match the requested shape.
    #[error("failed to decode JSON body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serializes `value` into a JSON request body.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] when `value` cannot be serialized.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// Parses a response body.
///
/// An empty or whitespace-only body decodes to an empty object.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] when the body is not valid JSON.
pub fn decode(body: &str) -> Result<Value, CodecError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(body).map_err(CodecError::Decode)
}

/// Parses a response body into a typed shape, with the same empty-body rule as [`decode`].
///
/// # Errors
///
/// Returns [`CodecError::Decode`] when the body is not valid JSON or does not match `T`.
pub fn decode_as<T: DeserializeOwned>(body: &str) -> Result<T, CodecError> {
    from_value(decode(body)?)
}

/// Converts an already decoded body into a typed shape.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] when `value` does not match `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, CodecError> {
    serde_json::from_value(value).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_beyond_f64_range_round_trip_exactly() {
        for digits in [
            "9007199254740993",
            "-9007199254740993",
            "18446744073709551616",
            "123456789012345678901234567890",
        ] {
            let decoded = decode(digits).expect("decode");
            assert_eq!(encode(&decoded).expect("encode"), digits);
        }
    }

    #[test]
    fn nested_large_integers_keep_their_digits() {
        let body = r#"{"address":"0xabc","counters":[9007199254740993],"eth_balance":1000000000000000000001}"#;
        let decoded = decode(body).expect("decode");
        assert_eq!(decoded["eth_balance"].to_string(), "1000000000000000000001");
        assert_eq!(encode(&decoded).expect("encode"), body);
    }

    #[test]
    fn empty_body_decodes_to_empty_object() {
        assert_eq!(decode("").expect("empty"), json!({}));
        assert_eq!(decode("  \n").expect("whitespace"), json!({}));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode("{\"detail\":").expect_err("truncated body");
        assert!(matches!(err, CodecError::Decode(_)));
        assert!(err.to_string().starts_with("failed to decode JSON body"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn typed_decode_reports_shape_mismatch() {
        assert_eq!(
            decode_as::<Counter>("{\"count\":3}").expect("decode"),
            Counter { count: 3 }
        );
        assert!(decode_as::<Counter>("{\"count\":\"three\"}").is_err());
    }
}

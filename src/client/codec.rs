//! JSON body encoding and decoding.

use serde::{de::DeserializeOwned, Serialize};

use crate::Result;

/// Encode a request body as JSON bytes.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}

/// Decode a response body from JSON bytes.
///
/// An empty (or whitespace-only) body is read as JSON `null`, so that
/// endpoints answering `204 No Content` can be decoded into `()` or an
/// `Option`.
pub fn decode_body<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_round_trip() {
        let value = json!({
            "email": "jane@example.com",
            "custom_variables": [{ "name": "db_id", "value": "1" }],
            "number": 42,
            "notes": null
        });
        let bytes = encode_body(&value).unwrap();
        let decoded: Value = decode_body(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_empty_body_is_null() {
        decode_body::<()>(b"").unwrap();
        decode_body::<()>(b"  \n").unwrap();
        let opt: Option<Value> = decode_body(b"").unwrap();
        assert!(opt.is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_body::<Value>(b"Not Found").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }
}

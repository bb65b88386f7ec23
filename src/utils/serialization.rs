// Canonical JSON layer. The bytes produced here are both hashed for
// proof-of-work and sent as the HTTP body, so they must never depend on
// anything but field values: struct fields in declaration order, compact
// separators, integers in decimal.
use crate::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a request into its canonical byte sequence
pub fn canonical_encode<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(data)
        .map_err(|e| ClientError::Encoding(format!("Serialization failed: {e}")))
}

/// Decode canonical bytes back into a value
pub fn canonical_decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::Encoding(format!("Deserialization failed: {e}")))
}

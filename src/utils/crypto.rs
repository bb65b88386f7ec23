use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256};

use crate::error::{ClientError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in whole seconds
pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ClientError::Config(format!("System time error: {e}")))?
        .as_secs();

    i64::try_from(duration).map_err(|_| ClientError::Config("Timestamp overflow".to_string()))
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    HEXLOWER.encode(sha256_digest(data).as_slice())
}

pub fn hex_decode(label: &str, data: &str) -> std::result::Result<Vec<u8>, String> {
    hex::decode(data.trim()).map_err(|e| format!("Invalid {label} hex: {e}"))
}

//! Error handling for the registry client
//!
//! Every fallible operation in the request pipeline returns one of these.
//! Nothing below `main` terminates the process.

use std::fmt;

/// Result type alias for registry client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error types for building, stamping and sending registry requests
#[derive(Debug, Clone)]
pub enum ClientError {
    /// Missing or invalid flag, config file entry or credential
    Config(String),
    /// Key file missing, unreadable, or not a valid PEM encoded EC key
    KeyLoad(String),
    /// ECDSA signing or signature decoding failure
    Signing(String),
    /// Canonical encoding failure
    Encoding(String),
    /// Connection, timeout or other transport failure
    Network(String),
    /// File I/O errors
    Io(String),
    /// Proof-of-work search cannot succeed (bad difficulty, nonce space exhausted)
    ProofOfWork(String),
    /// Proof-of-work search stopped before a nonce was found
    Cancelled { attempts: u64 },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ClientError::KeyLoad(msg) => write!(f, "Key load error: {msg}"),
            ClientError::Signing(msg) => write!(f, "Signing error: {msg}"),
            ClientError::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            ClientError::Network(msg) => write!(f, "Network error: {msg}"),
            ClientError::Io(msg) => write!(f, "I/O error: {msg}"),
            ClientError::ProofOfWork(msg) => write!(f, "Proof-of-work error: {msg}"),
            ClientError::Cancelled { attempts } => {
                write!(f, "Proof-of-work cancelled after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Encoding(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

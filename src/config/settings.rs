use crate::core::{PowCancellation, MAX_DIFFICULTY};
use crate::error::{ClientError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_DIFFICULTY: usize = 4;

pub const PUBLIC_KEY_VAR: &str = "PUBLIC_KEY";

/// Optional TOML config file. Every entry can be overridden on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub pow_zeros: Option<usize>,
    pub pow_timeout_secs: Option<u64>,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<FileSettings> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<FileSettings> {
        Ok(toml::from_str(contents)?)
    }
}

/// Values given on the command line, if any
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
    pub difficulty: Option<usize>,
    pub pow_timeout: Option<Duration>,
}

/// Resolved settings for one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub timeout: Duration,
    pub difficulty: usize,
    pub pow_timeout: Option<Duration>,
}

impl Settings {
    /// Merge flags over the config file over defaults
    pub fn resolve(overrides: Overrides, file: FileSettings) -> Result<Settings> {
        let endpoint = overrides
            .endpoint
            .or(file.endpoint)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ClientError::Config("endpoint is required (--endpoint)".to_string()))?;

        let timeout = overrides
            .timeout
            .or(file.timeout_secs.map(Duration::from_secs))
            .unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ClientError::Config("timeout must be positive".to_string()));
        }

        let difficulty = overrides
            .difficulty
            .or(file.pow_zeros)
            .unwrap_or(DEFAULT_DIFFICULTY);
        if difficulty > MAX_DIFFICULTY {
            return Err(ClientError::Config(format!(
                "pow-zeros must be at most {MAX_DIFFICULTY}, got {difficulty}"
            )));
        }

        let pow_timeout = overrides
            .pow_timeout
            .or(file.pow_timeout_secs.map(Duration::from_secs));
        if pow_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ClientError::Config("pow-timeout must be positive".to_string()));
        }

        Ok(Settings {
            endpoint,
            timeout,
            difficulty,
            pow_timeout,
        })
    }

    pub fn pow_cancellation(&self) -> PowCancellation {
        match self.pow_timeout {
            Some(timeout) => PowCancellation::with_timeout(timeout),
            None => PowCancellation::new(),
        }
    }

    /// Public key to register, from `PUBLIC_KEY`
    pub fn public_key_from_env() -> Result<String> {
        Self::public_key_from(env::var(PUBLIC_KEY_VAR).ok())
    }

    pub fn public_key_from(value: Option<String>) -> Result<String> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ClientError::Config(format!("empty {PUBLIC_KEY_VAR}"))),
        }
    }
}

//! Configuration management
//!
//! Defaults, the optional TOML config file and the `PUBLIC_KEY` credential.
//! Resolved once in `main` and passed down explicitly.

pub mod settings;

pub use settings::{
    FileSettings, Overrides, Settings, DEFAULT_DIFFICULTY, DEFAULT_TIMEOUT, PUBLIC_KEY_VAR,
};

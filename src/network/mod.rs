//! HTTP transport to the registry
//!
//! Sends a stamped request once and hands back the raw status and body.

pub mod client;

pub use client::{normalize_endpoint, RawResponse, RegistryClient};

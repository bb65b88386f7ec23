//! # Site Registry Client
//!
//! Command-line client for a name registry: register a user, claim or update
//! a site record (name to address, with an expiry and an owner), and resolve
//! a site's address.
//!
//! ## What every request goes through
//! - **Request model**: `RegisterRequest`, `SetSiteRequest`, `GetSiteRequest`,
//!   all behind the `RegistryRequest` trait
//! - **Canonical encoding**: compact JSON, fields in declaration order. The
//!   same bytes are hashed and sent
//! - **Ownership signature** (set_site only): ECDSA P-256 over
//!   `sha256(owner || site || timestamp)`, hex DER
//! - **Proof-of-work**: bump the nonce until the hex SHA-256 of the body starts
//!   with the configured number of zeros
//! - **Transport**: one blocking HTTP call, status and body printed as-is
//!
//! ## Layout
//! - `core/`: request shapes, proof-of-work search, ownership signing
//! - `keys/`: loading, generating and writing P-256 keys
//! - `network/`: HTTP client
//! - `config/`: defaults, TOML config file, `PUBLIC_KEY`
//! - `utils/`: hashing, timestamps, canonical JSON
//! - `cli/`: argument parsing

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod keys;
pub mod network;
pub mod utils;

pub use cli::{Command, Opt};
pub use config::{FileSettings, Overrides, Settings};
pub use core::{
    add_proof_of_work, GetSiteRequest, HttpVerb, PowCancellation, PowOutcome, ProofOfWork,
    RegisterRequest, RegistryRequest, SetSiteRequest,
};
pub use error::{ClientError, Result};
pub use keys::OwnerKey;
pub use network::{RawResponse, RegistryClient};

//! Utility functions and helpers
//!
//! Hashing, timestamps and the canonical JSON layer shared by the
//! request pipeline.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, hex_decode, sha256_digest, sha256_hex};

pub use serialization::{canonical_decode, canonical_encode};

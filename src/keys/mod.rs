//! Ownership key management
//!
//! Loading, generating and writing the P-256 keys used to sign site updates.

pub mod owner_key;

pub use owner_key::{
    load_public_key_file, parse_public_key, OwnerKey, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};

//! Ownership signatures for site updates.
//!
//! The signed message is `sha256(owner || site || decimal(timestamp))` with no
//! separators. A verifier has to rebuild exactly these bytes, so neither the
//! order nor the formatting may change.

use crate::core::{RegistryRequest, SetSiteRequest};
use crate::error::{ClientError, Result};
use crate::keys::OwnerKey;
use crate::utils::{hex_decode, sha256_digest};
use data_encoding::HEXLOWER;
use log::{debug, info};
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, VerifyingKey};
use rand::rngs::OsRng;

pub fn ownership_message(owner: &str, site: &str, timestamp: i64) -> String {
    format!("{owner}{site}{timestamp}")
}

pub fn ownership_digest(owner: &str, site: &str, timestamp: i64) -> Vec<u8> {
    sha256_digest(ownership_message(owner, site, timestamp).as_bytes())
}

/// Sign the ownership digest. Every call draws fresh randomness from the OS,
/// so the same input yields a different signature each time.
///
/// Returns the DER signature as lowercase hex.
pub fn sign_ownership(key: &OwnerKey, owner: &str, site: &str, timestamp: i64) -> Result<String> {
    let digest = ownership_digest(owner, site, timestamp);
    let signature: Signature = key
        .signing_key()
        .sign_prehash_with_rng(&mut OsRng, &digest)
        .map_err(|e| ClientError::Signing(format!("Failed to sign ownership message: {e}")))?;
    Ok(HEXLOWER.encode(signature.to_der().as_bytes()))
}

/// Check a hex DER signature against the ownership digest.
/// `Ok(false)` means well formed but not valid for this key and message.
pub fn verify_ownership(
    public_key: &VerifyingKey,
    owner: &str,
    site: &str,
    timestamp: i64,
    signature_hex: &str,
) -> Result<bool> {
    let bytes = hex_decode("signature", signature_hex).map_err(ClientError::Signing)?;
    let signature = Signature::from_der(&bytes)
        .map_err(|e| ClientError::Signing(format!("Invalid DER signature: {e}")))?;
    let digest = ownership_digest(owner, site, timestamp);
    Ok(public_key.verify_prehash(&digest, &signature).is_ok())
}

impl SetSiteRequest {
    /// Attach an ownership signature. Has to happen before the nonce search
    /// since the signature is part of the hashed body.
    pub fn sign(&mut self, key: &OwnerKey) -> Result<()> {
        if self.nonce() != 0 {
            return Err(ClientError::Signing(
                "request already stamped with proof-of-work".to_string(),
            ));
        }
        let signature = sign_ownership(key, &self.owner, &self.site, self.timestamp)?;
        debug!("Ownership signature {signature}");
        info!("Signed /set_site for {} as {}", self.site, self.owner);
        self.set_signature(signature);
        Ok(())
    }

    pub fn verify_signature(&self, public_key: &VerifyingKey) -> Result<bool> {
        verify_ownership(
            public_key,
            &self.owner,
            &self.site,
            self.timestamp,
            self.signature(),
        )
    }
}

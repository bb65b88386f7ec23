use crate::error::{ClientError, Result};
use crate::utils::{canonical_encode, current_timestamp};
use serde::{Deserialize, Serialize};

/// HTTP verb a request is sent with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

/// A request the registry accepts: it carries a nonce the proof-of-work
/// search can bump and it has a canonical encoding.
///
/// The nonce can only move forward through `increment_nonce`; nothing else
/// in the crate writes it.
pub trait RegistryRequest: Serialize {
    /// Path appended to the endpoint, without the leading slash
    const PATH: &'static str;
    const VERB: HttpVerb;

    fn nonce(&self) -> i64;

    fn increment_nonce(&mut self);

    /// Checked once before the nonce search starts
    fn ready_for_stamping(&self) -> Result<()> {
        Ok(())
    }

    /// Canonical bytes: hashed for proof-of-work and sent as the body
    fn encode(&self) -> Result<Vec<u8>> {
        canonical_encode(self)
    }
}

/// Claim a user name bound to a public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub pubkey: String,
    pub timestamp: i64,
    nonce: i64,
}

impl RegisterRequest {
    pub fn new(name: &str, pubkey: &str) -> Result<RegisterRequest> {
        Self::with_timestamp(name, pubkey, current_timestamp()?)
    }

    pub fn with_timestamp(name: &str, pubkey: &str, timestamp: i64) -> Result<RegisterRequest> {
        if pubkey.trim().is_empty() {
            return Err(ClientError::Config("empty public key".to_string()));
        }
        Ok(RegisterRequest {
            name: name.to_string(),
            pubkey: pubkey.to_string(),
            timestamp,
            nonce: 0,
        })
    }
}

impl RegistryRequest for RegisterRequest {
    const PATH: &'static str = "register";
    const VERB: HttpVerb = HttpVerb::Post;

    fn nonce(&self) -> i64 {
        self.nonce
    }

    fn increment_nonce(&mut self) {
        self.nonce += 1;
    }
}

/// Create or update a site record. Must be signed before the nonce search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSiteRequest {
    pub site: String,
    pub address: String,
    pub expires: i64,
    pub owner: String,
    signature: String,
    pub timestamp: i64,
    nonce: i64,
}

impl SetSiteRequest {
    pub fn new(site: &str, address: &str, expires: i64, owner: &str) -> Result<SetSiteRequest> {
        Ok(Self::with_timestamp(
            site,
            address,
            expires,
            owner,
            current_timestamp()?,
        ))
    }

    pub fn with_timestamp(
        site: &str,
        address: &str,
        expires: i64,
        owner: &str,
        timestamp: i64,
    ) -> SetSiteRequest {
        SetSiteRequest {
            site: site.to_string(),
            address: address.to_string(),
            expires,
            owner: owner.to_string(),
            signature: String::new(),
            timestamp,
            nonce: 0,
        }
    }

    /// Hex DER signature, empty until signed
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    pub(crate) fn set_signature(&mut self, signature: String) {
        self.signature = signature;
    }
}

impl RegistryRequest for SetSiteRequest {
    const PATH: &'static str = "set_site";
    const VERB: HttpVerb = HttpVerb::Post;

    fn ready_for_stamping(&self) -> Result<()> {
        if !self.is_signed() {
            return Err(ClientError::Signing(
                "set_site request must be signed before proof-of-work".to_string(),
            ));
        }
        Ok(())
    }

    fn nonce(&self) -> i64 {
        self.nonce
    }

    fn increment_nonce(&mut self) {
        self.nonce += 1;
    }
}

/// Look up the address of a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSiteRequest {
    pub site: String,
    pub timestamp: i64,
    nonce: i64,
}

impl GetSiteRequest {
    pub fn new(site: &str) -> Result<GetSiteRequest> {
        Ok(Self::with_timestamp(site, current_timestamp()?))
    }

    pub fn with_timestamp(site: &str, timestamp: i64) -> GetSiteRequest {
        GetSiteRequest {
            site: site.to_string(),
            timestamp,
            nonce: 0,
        }
    }
}

impl RegistryRequest for GetSiteRequest {
    const PATH: &'static str = "get_site";
    const VERB: HttpVerb = HttpVerb::Get;

    fn nonce(&self) -> i64 {
        self.nonce
    }

    fn increment_nonce(&mut self) {
        self.nonce += 1;
    }
}

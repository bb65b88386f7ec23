//! Request construction pipeline
//!
//! The three request shapes, the proof-of-work search that stamps them and
//! the ownership signature that authorizes site updates.

pub mod ownership;
pub mod proof_of_work;
pub mod request;

pub use ownership::{ownership_digest, ownership_message, sign_ownership, verify_ownership};
pub use proof_of_work::{
    add_proof_of_work, meets_difficulty, PowCancellation, PowOutcome, ProofOfWork, MAX_DIFFICULTY,
};
pub use request::{GetSiteRequest, HttpVerb, RegisterRequest, RegistryRequest, SetSiteRequest};

use crate::core::RegistryRequest;
use crate::error::{ClientError, Result};
use crate::utils::sha256_hex;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Length of a SHA-256 digest in hex characters; no prefix can be longer
pub const MAX_DIFFICULTY: usize = 64;

const MAX_NONCE: i64 = i64::MAX;

// Cancellation is polled, not checked on every hash
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Stops a running proof-of-work search, either on request or once a
/// deadline passes. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct PowCancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl PowCancellation {
    pub fn new() -> PowCancellation {
        PowCancellation::default()
    }

    pub fn with_timeout(timeout: Duration) -> PowCancellation {
        PowCancellation {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }
}

/// Result of a successful nonce search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowOutcome {
    pub nonce: i64,
    pub hash: String,
    pub attempts: u64,
}

pub struct ProofOfWork {
    difficulty: usize,
    cancellation: PowCancellation,
}

impl ProofOfWork {
    pub fn new(difficulty: usize) -> Result<ProofOfWork> {
        if difficulty > MAX_DIFFICULTY {
            return Err(ClientError::ProofOfWork(format!(
                "difficulty {difficulty} exceeds digest length {MAX_DIFFICULTY}"
            )));
        }
        Ok(ProofOfWork {
            difficulty,
            cancellation: PowCancellation::new(),
        })
    }

    pub fn with_cancellation(mut self, cancellation: PowCancellation) -> ProofOfWork {
        self.cancellation = cancellation;
        self
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Check a request's current nonce against `difficulty`
    pub fn validate<R: RegistryRequest>(request: &R, difficulty: usize) -> Result<bool> {
        let data = request.encode()?;
        Ok(meets_difficulty(&sha256_hex(&data), difficulty))
    }

    /// Bump the request's nonce until the hex digest of its canonical
    /// encoding starts with `difficulty` zeros. The nonce is the only thing
    /// mutated. Blocks the calling thread until found or cancelled.
    pub fn run<R: RegistryRequest>(&self, request: &mut R) -> Result<PowOutcome> {
        request.ready_for_stamping()?;
        let started = Instant::now();
        let mut attempts: u64 = 0;
        loop {
            if attempts % CANCEL_CHECK_INTERVAL == 0 && self.cancellation.is_cancelled() {
                return Err(ClientError::Cancelled { attempts });
            }
            if request.nonce() == MAX_NONCE {
                return Err(ClientError::ProofOfWork(format!(
                    "nonce space exhausted after {attempts} attempts"
                )));
            }

            request.increment_nonce();
            attempts += 1;

            let data = request.encode()?;
            let hash = sha256_hex(&data);
            if meets_difficulty(&hash, self.difficulty) {
                info!(
                    "Found nonce {} for /{} after {} attempts in {:?}",
                    request.nonce(),
                    R::PATH,
                    attempts,
                    started.elapsed()
                );
                debug!("Proof-of-work digest {hash}");
                return Ok(PowOutcome {
                    nonce: request.nonce(),
                    hash,
                    attempts,
                });
            }
        }
    }
}

/// Stamp `request` with a nonce meeting `difficulty`
pub fn add_proof_of_work<R: RegistryRequest>(
    request: &mut R,
    difficulty: usize,
) -> Result<PowOutcome> {
    ProofOfWork::new(difficulty)?.run(request)
}

pub fn meets_difficulty(hash_hex: &str, difficulty: usize) -> bool {
    hash_hex.len() >= difficulty && hash_hex.bytes().take(difficulty).all(|b| b == b'0')
}

//! # Ownership Verification
//!
//! Boolean proof-of-ownership over a raw request body. Every failure mode of
//! the identity collaborator (error, panic, missing or blank signature)
//! collapses to `false`; callers turn that into an `AuthError`.

use ld_01_identity::{IdentityVerifier, OwnerPkh};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct OwnershipVerifier {
    identity: Arc<dyn IdentityVerifier>,
}

impl OwnershipVerifier {
    pub fn new(identity: Arc<dyn IdentityVerifier>) -> Self {
        Self { identity }
    }

    /// True iff `signature` was made over exactly `payload` by `owner`.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>, owner: &OwnerPkh) -> bool {
        let Some(signature) = signature.map(str::trim).filter(|s| !s.is_empty()) else {
            debug!(owner = %owner, "[ld-02] No signature presented");
            return false;
        };

        let identity = &self.identity;
        match catch_unwind(AssertUnwindSafe(|| {
            identity.verify_message(payload, signature, owner)
        })) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!(owner = %owner, error = %e, "[ld-02] Ownership proof rejected");
                false
            }
            Err(_) => {
                warn!(owner = %owner, "[ld-02] Identity verifier panicked");
                false
            }
        }
    }
}

//! # Identity Verification Service
//!
//! Application service implementing the `IdentityVerifier` port with
//! secp256k1 compact signatures.

use crate::domain::errors::IdentityError;
use crate::domain::message;
use crate::domain::pkh::OwnerPkh;
use crate::ports::inbound::IdentityVerifier;
use tracing::debug;

/// Verifies wallet-style signed messages.
#[derive(Debug, Clone, Default)]
pub struct MessageSigningVerifier;

impl MessageSigningVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityVerifier for MessageSigningVerifier {
    fn verify_message(
        &self,
        payload: &[u8],
        signature: &str,
        claimed: &OwnerPkh,
    ) -> Result<(), IdentityError> {
        let result = message::verify_message(payload, signature, claimed);
        if let Err(ref e) = result {
            debug!(owner = %claimed, error = %e, "signed message rejected");
        }
        result
    }
}

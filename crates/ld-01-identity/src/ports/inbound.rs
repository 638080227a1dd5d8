//! # Inbound Ports (Driving Ports / API)
//!
//! The identity collaborator as seen by the registry. The registry injects an
//! implementation of this trait instead of reaching for a process-wide wallet.

use crate::domain::errors::IdentityError;
use crate::domain::pkh::OwnerPkh;

/// Signed-message verification primitive.
///
/// Implementations must be thread-safe (`Send + Sync`). Errors carry the
/// reason for diagnostics only; callers deciding authorization treat every
/// error as "not proven".
pub trait IdentityVerifier: Send + Sync {
    /// Verify that `signature` over the exact bytes of `payload` was made by
    /// the key behind `claimed`.
    fn verify_message(
        &self,
        payload: &[u8],
        signature: &str,
        claimed: &OwnerPkh,
    ) -> Result<(), IdentityError>;
}

//! # Identity Errors
//!
//! Error types for owner-token decoding and signed-message verification.

use thiserror::Error;

/// Errors that can occur while decoding an owner token or verifying a
/// signed message against one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Token text is outside the accepted length bounds
    #[error("Owner token length {len} outside [{min}, {max}]")]
    InvalidLength { len: usize, min: usize, max: usize },

    /// Token is not valid base58 or its checksum does not match
    #[error("Owner token is not valid base58check: {0}")]
    InvalidEncoding(String),

    /// Decoded payload is not version byte + 20-byte hash
    #[error("Owner token payload has {0} bytes, expected 21")]
    InvalidPayload(usize),

    /// Signature token is empty
    #[error("Missing signature")]
    MissingSignature,

    /// Signature token is not base64 or not 65 bytes
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Header byte must be in [27, 34]
    #[error("Invalid signature header: {0}")]
    InvalidHeader(u8),

    /// Failed to recover a public key from the signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match the claimed owner
    #[error("Signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: String, actual: String },

    /// Signing failed (client side only)
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

//! # Owner Identity (ld-01)
//!
//! Owner tokens and signed-message verification for Lease-DNS.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): token codec, message digest, key recovery
//! - **Ports Layer** (`ports/`): the `IdentityVerifier` trait the registry consumes
//! - **Service Layer** (`service.rs`): the secp256k1 implementation of that trait
//!
//! ## Security Notes
//!
//! - Ownership is proven by signature, never by transmitting a secret
//! - Signatures cover the raw request body; any re-encoding invalidates them
//! - Replay protection is out of scope: a captured signed body can be resent

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::errors::IdentityError;
pub use domain::message::{
    message_digest, recover_signer, sign_message, verify_message, CompactSignature,
};
pub use domain::pkh::{hash160, OwnerPkh, MAINNET_VERSION, TESTNET_VERSION};
pub use ports::inbound::IdentityVerifier;
pub use service::MessageSigningVerifier;

/// Key types callers need to sign requests.
pub use k256::ecdsa::{SigningKey, VerifyingKey};

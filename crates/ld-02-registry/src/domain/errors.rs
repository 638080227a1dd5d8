//! # Registry Errors
//!
//! Every boundary-facing operation returns `RegistryError`, which has exactly
//! four kinds: validation, authorization, not-found and storage. Lower-level
//! failures are folded into one of these through `From` conversions, so the
//! caller never sees an unclassified error.

use super::entities::RecordType;
use ld_01_identity::IdentityError;
use thiserror::Error;

/// Malformed or out-of-range input. Never mutates state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid name: {reason}")]
    InvalidName { reason: &'static str },

    #[error("Invalid lease duration: {0} days")]
    InvalidDays(i64),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(i64),

    #[error("Invalid record type: {0}")]
    InvalidRecType(String),

    #[error("Invalid {rec_type} address: {address}")]
    InvalidAddress { rec_type: RecordType, address: String },

    #[error("Invalid owner: {0}")]
    InvalidOwner(#[from] IdentityError),

    #[error("Too many records: {count} (max {max})")]
    TooManyRecords { count: usize, max: usize },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Ownership could not be established. All variants surface to clients as
/// "permission denied"; the variant is kept for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Anonymous leases are read-only
    #[error("Permission denied: lease has no owner")]
    AnonymousLease,

    /// Signature missing, malformed, or not made by the owner
    #[error("Permission denied: ownership not proven")]
    InvalidSignature,

    /// Claimed owner differs from the lease's recorded owner
    #[error("Permission denied: claimed owner does not hold the lease")]
    OwnerMismatch,

    /// Name is held by a live lease and the collision policy forbids takeover
    #[error("Permission denied: name is leased")]
    NameTaken,
}

/// Failure inside a storage adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("I/O error: {message}")]
    IoError { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Corrupt entry at key {key}")]
    Corrupt { key: String },
}

/// Error classification reported at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Storage,
}

/// Top-level error for registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Unknown or expired; the two are deliberately indistinguishable
    #[error("Unknown name: {name}")]
    NotFound { name: String },

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl RegistryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        RegistryError::NotFound { name: name.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Validation(_) => ErrorKind::Validation,
            RegistryError::Auth(_) => ErrorKind::Auth,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        RegistryError::Storage(e.to_string())
    }
}

//! # Name Registry (ld-02)
//!
//! The registration, ownership and authorization state machine of
//! Lease-DNS: who holds a name, until when, and which address records it
//! resolves to.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Validate first | Every field is checked before the first storage read |
//! | Atomic batches | A record set is replaced whole or not at all |
//! | Lease pairing | Lease and records are created and destroyed together |
//! | Liveness | `lookup` only returns leases with `now < expires_at` |
//! | Owned mutation | Update and delete require a signature by the lease owner |
//! | Per-name serialization | Mutations of one name never interleave |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - entities, commands, validation, errors
//! - `ports/` - `RegistrationApi` (inbound), `KeyValueStore` / `TimeSource` (outbound)
//! - `store/` - lease and record relations on top of `KeyValueStore`
//! - `auth.rs` - ownership proof
//! - `service/` - `RegistrationService`
//! - `adapters/` - in-memory, file-backed and RocksDB stores; clocks
//!
//! ## Usage
//!
//! ```ignore
//! use ld_02_registry::{RegistrationApi, RegistrationService, RegistryConfig};
//!
//! let service = RegistrationService::new_in_memory(RegistryConfig::default());
//! service.register(RegisterCommand::new("example").days(30), SignedPayload::unsigned(body))?;
//! let names = service.list_names()?;
//! ```

pub mod adapters;
pub mod auth;
pub mod domain;
pub mod ports;
pub mod service;
pub mod store;

// Re-export public API
pub use adapters::{FileBackedKVStore, InMemoryKVStore, ManualClock, SystemTimeSource};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use auth::OwnershipVerifier;
pub use domain::commands::{DeleteCommand, RegisterCommand, SignedPayload, UpdateCommand};
pub use domain::config::{CollisionPolicy, RegistryConfig};
pub use domain::constants::*;
pub use domain::entities::{
    DomainName, HostInfo, HostRecord, Lease, LeaseDays, RawRecord, RecordBatch, RecordType,
    Timestamp,
};
pub use domain::errors::{AuthError, ErrorKind, RegistryError, StoreError, ValidationError};
pub use domain::validation::{validate_batch, validate_name, validate_owner, validate_record};
pub use ports::inbound::RegistrationApi;
pub use ports::outbound::{BatchOperation, KeyValueStore, ScanResult, TimeSource};
pub use service::{NameLocks, RegistrationService, RegistryDependencies};
pub use store::{KeyPrefix, NameRegistry, RecordStore};

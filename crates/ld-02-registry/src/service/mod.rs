//! # Registration Service
//!
//! Orchestrates validation, ownership proof and storage for each request
//! type. The only component the boundary layer calls.
//!
//! ## Name lifecycle
//!
//! ```text
//! Unleased ──register──→ Leased(owner?) ──time──→ Expired
//!    ↑                        │    ↑                 │
//!    └────────delete──────────┘    └───register──────┘
//! ```
//!
//! Every mutation validates its whole input before the first read, then
//! runs its read-check-write sequence under the name's lock and commits
//! through a single atomic batch.

mod locks;

pub use locks::NameLocks;

use crate::adapters::{InMemoryKVStore, SystemTimeSource};
use crate::auth::OwnershipVerifier;
use crate::domain::commands::{DeleteCommand, RegisterCommand, SignedPayload, UpdateCommand};
use crate::domain::config::{CollisionPolicy, RegistryConfig};
use crate::domain::entities::{DomainName, HostInfo, Lease, LeaseDays};
use crate::domain::errors::{AuthError, RegistryError, ValidationError};
use crate::domain::validation::{validate_batch, validate_owner};
use crate::ports::inbound::RegistrationApi;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use crate::store::{NameRegistry, RecordStore};
use ld_01_identity::{IdentityVerifier, MessageSigningVerifier, OwnerPkh};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dependencies for `RegistrationService`.
pub struct RegistryDependencies<S, T> {
    pub store: S,
    pub clock: T,
    pub identity: Arc<dyn IdentityVerifier>,
}

pub struct RegistrationService<S, T> {
    store: Arc<S>,
    names: NameRegistry<S, T>,
    records: RecordStore<S>,
    ownership: OwnershipVerifier,
    locks: NameLocks,
    config: RegistryConfig,
}

impl<S: KeyValueStore, T: TimeSource> RegistrationService<S, T> {
    pub fn new(deps: RegistryDependencies<S, T>, config: RegistryConfig) -> Self {
        let store = Arc::new(deps.store);
        Self {
            names: NameRegistry::new(store.clone(), deps.clock),
            records: RecordStore::new(store.clone()),
            store,
            ownership: OwnershipVerifier::new(deps.identity),
            locks: NameLocks::new(config.lock_stripes),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Whether `signed` lets the caller take over a live lease.
    fn check_collision(&self, existing: &Lease, signed: SignedPayload<'_>) -> Result<(), AuthError> {
        match self.config.collision_policy {
            CollisionPolicy::Overwrite => Ok(()),
            CollisionPolicy::Reject => Err(AuthError::NameTaken),
            CollisionPolicy::RequireOwnerProof => match &existing.owner {
                None => Err(AuthError::AnonymousLease),
                Some(owner) => self.require_proof(signed, owner),
            },
        }
    }

    fn require_proof(&self, signed: SignedPayload<'_>, owner: &OwnerPkh) -> Result<(), AuthError> {
        if self.ownership.verify(signed.body, signed.signature, owner) {
            Ok(())
        } else {
            Err(AuthError::InvalidSignature)
        }
    }

    fn reject(&self, op: &'static str, name: &str, err: RegistryError) -> RegistryError {
        match &err {
            RegistryError::Validation(e) => debug!(op, name, error = %e, "[ld-02] Rejected"),
            RegistryError::Auth(e) => warn!(op, name, error = %e, "[ld-02] Permission denied"),
            RegistryError::NotFound { .. } => debug!(op, name, "[ld-02] Unknown name"),
            RegistryError::Storage(e) => warn!(op, name, error = %e, "[ld-02] Storage failure"),
        }
        err
    }

    fn do_register(&self, cmd: RegisterCommand, signed: SignedPayload<'_>) -> Result<Lease, RegistryError> {
        let name = DomainName::parse(&cmd.name)?;
        let days = LeaseDays::new(cmd.days)?;
        let owner = validate_owner(cmd.owner.as_deref())?;
        let batch = validate_batch(&name, &cmd.records)?;

        let _guard = self.locks.lock(&name);

        let now = self.names.now();
        if let Some(existing) = self.names.get_lease(&name)?.filter(|l| l.is_live(now)) {
            self.check_collision(&existing, signed)?;
            debug!(
                name = %name,
                policy = ?self.config.collision_policy,
                "[ld-02] Taking over live lease"
            );
        }

        let lease = self.names.new_lease(name, days, owner);
        let mut ops = vec![NameRegistry::<S, T>::put_op(&lease)?];
        ops.extend(self.records.replace_ops(&batch)?);
        self.store.atomic_batch_write(ops)?;

        info!(
            name = %lease.name,
            expires_at = lease.expires_at,
            owner = lease.owner.as_ref().map(OwnerPkh::as_str).unwrap_or("anonymous"),
            records = batch.len(),
            "[ld-02] Lease registered"
        );
        Ok(lease)
    }

    fn do_update(&self, cmd: UpdateCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError> {
        let name = DomainName::parse(&cmd.name)?;
        let batch = validate_batch(&name, &cmd.records)?;

        let _guard = self.locks.lock(&name);

        let lease = self.names.lookup(&name)?;
        let owner = lease.owner.as_ref().ok_or(AuthError::AnonymousLease)?;
        self.require_proof(signed, owner)?;

        self.store.atomic_batch_write(self.records.replace_ops(&batch)?)?;

        info!(name = %name, records = batch.len(), "[ld-02] Records replaced");
        Ok(())
    }

    fn do_delete(&self, cmd: DeleteCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError> {
        let name = DomainName::parse(&cmd.name)?;
        let claimed = OwnerPkh::parse(&cmd.owner).map_err(ValidationError::InvalidOwner)?;

        self.require_proof(signed, &claimed)?;

        let _guard = self.locks.lock(&name);

        let Some(lease) = self.names.get_lease(&name)? else {
            debug!(name = %name, "[ld-02] Delete of absent name");
            return Ok(());
        };
        match &lease.owner {
            None => return Err(AuthError::AnonymousLease.into()),
            Some(owner) if !owner.same_identity(&claimed) => {
                return Err(AuthError::OwnerMismatch.into())
            }
            Some(_) => {}
        }

        let mut ops = self.records.clear_ops(&name)?;
        ops.push(NameRegistry::<S, T>::delete_op(&name));
        self.store.atomic_batch_write(ops)?;

        info!(name = %name, owner = %claimed, "[ld-02] Lease released");
        Ok(())
    }
}

impl RegistrationService<InMemoryKVStore, SystemTimeSource> {
    /// In-memory store, wall clock, secp256k1 signed-message verification.
    pub fn new_in_memory(config: RegistryConfig) -> Self {
        Self::new(
            RegistryDependencies {
                store: InMemoryKVStore::new(),
                clock: SystemTimeSource,
                identity: Arc::new(MessageSigningVerifier::new()),
            },
            config,
        )
    }
}

impl<S: KeyValueStore, T: TimeSource> RegistrationApi for RegistrationService<S, T> {
    fn register(&self, cmd: RegisterCommand, signed: SignedPayload<'_>) -> Result<Lease, RegistryError> {
        let name = cmd.name.clone();
        self.do_register(cmd, signed)
            .map_err(|e| self.reject("register", &name, e))
    }

    fn update(&self, cmd: UpdateCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError> {
        let name = cmd.name.clone();
        self.do_update(cmd, signed)
            .map_err(|e| self.reject("update", &name, e))
    }

    fn delete(&self, cmd: DeleteCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError> {
        let name = cmd.name.clone();
        self.do_delete(cmd, signed)
            .map_err(|e| self.reject("delete", &name, e))
    }

    fn list_names(&self) -> Result<Vec<String>, RegistryError> {
        self.names
            .list_names()
            .map_err(|e| self.reject("list", "*", e.into()))
    }

    fn lookup(&self, name: &str) -> Result<Lease, RegistryError> {
        DomainName::parse(name)
            .map_err(RegistryError::from)
            .and_then(|n| self.names.lookup(&n))
            .map_err(|e| self.reject("lookup", name, e))
    }

    fn lookup_host(&self, name: &str) -> Result<HostInfo, RegistryError> {
        let result = DomainName::parse(name)
            .map_err(RegistryError::from)
            .and_then(|n| {
                // Lease and records must come from the same committed batch
                let _guard = self.locks.lock(&n);
                let lease = self.names.lookup(&n)?;
                let records = self.records.records(&n)?;
                Ok(HostInfo { lease, records })
            });
        result.map_err(|e| self.reject("info", name, e))
    }
}

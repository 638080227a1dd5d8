//! Lease rows.

use super::{decode, encode, KeyPrefix};
use crate::domain::entities::{DomainName, Lease, LeaseDays, Timestamp};
use crate::domain::errors::{RegistryError, StoreError};
use crate::ports::outbound::{BatchOperation, KeyValueStore, TimeSource};
use ld_01_identity::OwnerPkh;
use std::sync::Arc;

/// Owns lease state: name, owner, creation and expiry.
pub struct NameRegistry<S, T> {
    store: Arc<S>,
    clock: T,
}

impl<S: KeyValueStore, T: TimeSource> NameRegistry<S, T> {
    pub fn new(store: Arc<S>, clock: T) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// A lease starting now. Not persisted.
    pub fn new_lease(&self, name: DomainName, days: LeaseDays, owner: Option<OwnerPkh>) -> Lease {
        let created_at = self.now();
        Lease {
            name,
            created_at,
            expires_at: created_at.saturating_add(days.as_seconds()),
            owner,
        }
    }

    /// Persist a lease starting now, overwriting any existing row.
    pub fn register(
        &self,
        name: DomainName,
        days: LeaseDays,
        owner: Option<OwnerPkh>,
    ) -> Result<Lease, StoreError> {
        let lease = self.new_lease(name, days, owner);
        self.store.atomic_batch_write(vec![Self::put_op(&lease)?])?;
        Ok(lease)
    }

    /// The live lease for `name`.
    pub fn lookup(&self, name: &DomainName) -> Result<Lease, RegistryError> {
        let now = self.now();
        self.get_lease(name)?
            .filter(|lease| lease.is_live(now))
            .ok_or_else(|| RegistryError::not_found(name.as_str()))
    }

    /// The stored lease row, regardless of expiry.
    pub fn get_lease(&self, name: &DomainName) -> Result<Option<Lease>, StoreError> {
        let key = KeyPrefix::lease_key(name);
        self.store
            .get(&key)?
            .map(|bytes| decode(&key, &bytes))
            .transpose()
    }

    /// Every name with a lease row, sorted. Expired leases are included.
    pub fn list_names(&self) -> Result<Vec<String>, StoreError> {
        let prefix = KeyPrefix::Lease.as_bytes();
        let mut names = self
            .store
            .prefix_scan(prefix)?
            .into_iter()
            .map(|(key, _)| {
                String::from_utf8(key[prefix.len()..].to_vec()).map_err(|_| StoreError::Corrupt {
                    key: String::from_utf8_lossy(&key).into_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }

    /// Delete the lease row. Releasing an absent name is not an error.
    pub fn release(&self, name: &DomainName) -> Result<(), StoreError> {
        self.store.atomic_batch_write(vec![Self::delete_op(name)])
    }

    pub fn put_op(lease: &Lease) -> Result<BatchOperation, StoreError> {
        Ok(BatchOperation::put(KeyPrefix::lease_key(&lease.name), encode(lease)?))
    }

    pub fn delete_op(name: &DomainName) -> BatchOperation {
        BatchOperation::delete(KeyPrefix::lease_key(name))
    }
}

//! Record rows.

use super::{decode, encode, KeyPrefix};
use crate::domain::entities::{DomainName, HostRecord, RecordBatch};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Owns the record set bound to each name.
pub struct RecordStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The current record set of `name`, in stored order.
    pub fn records(&self, name: &DomainName) -> Result<Vec<HostRecord>, StoreError> {
        self.store
            .prefix_scan(&KeyPrefix::record_prefix(name))?
            .into_iter()
            .map(|(key, value)| decode(&key, &value))
            .collect()
    }

    /// Replace the record set of `batch.name()` with `batch`, atomically.
    pub fn replace(&self, batch: &RecordBatch) -> Result<(), StoreError> {
        self.store.atomic_batch_write(self.replace_ops(batch)?)
    }

    /// Drop every record of `name`.
    pub fn clear(&self, name: &DomainName) -> Result<(), StoreError> {
        self.store.atomic_batch_write(self.clear_ops(name)?)
    }

    /// Operations that turn the stored set into exactly `batch`.
    ///
    /// New records take indexes `0..len`; any stored index outside that
    /// range is deleted, the rest are overwritten.
    pub fn replace_ops(&self, batch: &RecordBatch) -> Result<Vec<BatchOperation>, StoreError> {
        let name = batch.name();
        let mut ops = Vec::with_capacity(batch.len());
        let mut written = BTreeSet::new();

        for (index, record) in batch.records().iter().enumerate() {
            let key = KeyPrefix::record_key(name, index);
            written.insert(key.clone());
            ops.push(BatchOperation::put(key, encode(record)?));
        }

        for key in self.existing_keys(name)? {
            if !written.contains(&key) {
                ops.push(BatchOperation::delete(key));
            }
        }

        Ok(ops)
    }

    pub fn clear_ops(&self, name: &DomainName) -> Result<Vec<BatchOperation>, StoreError> {
        Ok(self
            .existing_keys(name)?
            .into_iter()
            .map(BatchOperation::delete)
            .collect())
    }

    fn existing_keys(&self, name: &DomainName) -> Result<Vec<Vec<u8>>, StoreError> {
        Ok(self
            .store
            .prefix_scan(&KeyPrefix::record_prefix(name))?
            .into_iter()
            .map(|(key, _)| key)
            .collect())
    }
}

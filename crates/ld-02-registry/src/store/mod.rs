//! # Registry Storage
//!
//! The two relations kept in the key-value store:
//!
//! - `NameRegistry`: lease rows, one per name
//! - `RecordStore`: the record set bound to each name
//!
//! Both expose single-call operations and the equivalent `BatchOperation`s,
//! so the service can combine lease and record changes into one atomic write.

mod keys;
mod names;
mod records;

pub use keys::KeyPrefix;
pub use names::NameRegistry;
pub use records::RecordStore;

use crate::domain::errors::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn encode<V: Serialize>(value: &V) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })
}

pub(crate) fn decode<V: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<V, StoreError> {
    bincode::deserialize(bytes).map_err(|_| StoreError::Corrupt {
        key: String::from_utf8_lossy(key).into_owned(),
    })
}

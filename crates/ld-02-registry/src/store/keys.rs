//! Key layout.
//!
//! `:` never appears in a valid name, so a name's record prefix can never
//! match another name's keys.

use crate::domain::entities::DomainName;

/// Key prefixes for the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Lease row: `lease:{name}` -> Lease
    Lease,
    /// Record row: `record:{name}:{index:06}` -> HostRecord
    Record,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Lease => b"lease:",
            KeyPrefix::Record => b"record:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn lease_key(name: &DomainName) -> Vec<u8> {
        KeyPrefix::Lease.key(name.as_str().as_bytes())
    }

    /// Prefix shared by every record of `name`, trailing `:` included.
    pub fn record_prefix(name: &DomainName) -> Vec<u8> {
        let mut key = KeyPrefix::Record.key(name.as_str().as_bytes());
        key.push(b':');
        key
    }

    /// Zero-padded so lexical key order is insertion order.
    pub fn record_key(name: &DomainName, index: usize) -> Vec<u8> {
        let mut key = Self::record_prefix(name);
        key.extend_from_slice(format!("{index:06}").as_bytes());
        key
    }
}

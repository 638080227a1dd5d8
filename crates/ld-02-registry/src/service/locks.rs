//! Per-name mutual exclusion.

use crate::domain::entities::DomainName;
use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A fixed table of mutexes indexed by a hash of the name.
///
/// Two mutations of the same name always contend on the same stripe.
/// Unrelated names may share a stripe, which only costs throughput.
pub struct NameLocks {
    stripes: Box<[Mutex<()>]>,
}

impl NameLocks {
    pub fn new(stripes: usize) -> Self {
        Self {
            stripes: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.stripes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stripes.is_empty()
    }

    pub fn stripe_of(&self, name: &DomainName) -> usize {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        (hasher.finish() % self.stripes.len() as u64) as usize
    }

    /// Block until `name`'s stripe is free and hold it for the guard's life.
    pub fn lock(&self, name: &DomainName) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe_of(name)].lock()
    }
}

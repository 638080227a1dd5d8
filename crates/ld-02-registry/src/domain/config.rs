//! Registry configuration.

use super::constants::DEFAULT_LOCK_STRIPES;
use serde::{Deserialize, Serialize};

/// What `register` does when the name is held by a live lease.
///
/// Absent or expired names are always claimable; this only governs takeover
/// of a live lease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The request must carry a signature by the current owner over the raw
    /// body. Live anonymous leases cannot be re-registered until they expire.
    #[default]
    RequireOwnerProof,
    /// Live leases can never be re-registered.
    Reject,
    /// Anyone may overwrite a live lease, including its owner.
    Overwrite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub collision_policy: CollisionPolicy,
    /// Number of mutexes that per-name mutations are striped across.
    pub lock_stripes: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            lock_stripes: DEFAULT_LOCK_STRIPES,
        }
    }
}

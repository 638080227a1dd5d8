//! Registry bounds.

/// Shortest registrable name.
pub const MIN_NAME_LEN: usize = 1;

/// Longest registrable name.
pub const MAX_NAME_LEN: usize = 64;

/// Shortest lease, in days.
pub const MIN_LEASE_DAYS: i64 = 1;

/// Longest lease, in days.
pub const MAX_LEASE_DAYS: i64 = 365;

/// Days used when a register request omits `days`.
pub const DEFAULT_LEASE_DAYS: i64 = 1;

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Minimum record TTL (seconds).
pub const MIN_TTL: i64 = 30;

/// Maximum record TTL (seconds): one week.
pub const MAX_TTL: i64 = 7 * 24 * 60 * 60;

/// Maximum records bound to a single name.
pub const MAX_RECORDS_PER_NAME: usize = 256;

/// Default number of lock stripes guarding per-name mutations.
pub const DEFAULT_LOCK_STRIPES: usize = 64;

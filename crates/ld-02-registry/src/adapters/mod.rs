//! # Adapters
//!
//! Implementations of the outbound ports.

mod file;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocksdb;
mod time;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use self::rocksdb::{RocksDbConfig, RocksDbStore};
pub use time::{ManualClock, SystemTimeSource};

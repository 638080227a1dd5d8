//! Shared test fixtures.

use ld_01_identity::{sign_message, MessageSigningVerifier, OwnerPkh, SigningKey, MAINNET_VERSION};
use ld_02_registry::{
    BatchOperation, InMemoryKVStore, KeyValueStore, ManualClock, RawRecord, RegistrationService,
    RegistryConfig, RegistryDependencies, ScanResult, StoreError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed start time for every manual clock.
pub const T0: u64 = 1_700_000_000;

/// A signing key and its compressed mainnet owner token.
pub struct Identity {
    pub key: SigningKey,
    pub pkh: OwnerPkh,
}

impl Identity {
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let pkh = OwnerPkh::from_verifying_key(key.verifying_key(), MAINNET_VERSION, true);
        Self { key, pkh }
    }

    pub fn sign(&self, body: &[u8]) -> String {
        sign_message(&self.key, body, true).expect("signing never fails for valid keys")
    }
}

pub fn a(address: &str) -> RawRecord {
    RawRecord::new(60, "A", address)
}

pub fn aaaa(address: &str) -> RawRecord {
    RawRecord::new(120, "AAAA", address)
}

/// Registry over `S` with a manual clock at `T0`.
pub struct Harness<S> {
    pub service: RegistrationService<Arc<S>, Arc<ManualClock>>,
    pub store: Arc<S>,
    pub clock: Arc<ManualClock>,
}

impl<S: KeyValueStore + 'static> Harness<S> {
    pub fn with_store(store: S, config: RegistryConfig) -> Self {
        let store = Arc::new(store);
        let clock = Arc::new(ManualClock::new(T0));
        let service = RegistrationService::new(
            RegistryDependencies {
                store: store.clone(),
                clock: clock.clone(),
                identity: Arc::new(MessageSigningVerifier::new()),
            },
            config,
        );
        Self {
            service,
            store,
            clock,
        }
    }
}

impl Harness<InMemoryKVStore> {
    pub fn in_memory() -> Self {
        Self::with_store(InMemoryKVStore::new(), RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_store(InMemoryKVStore::new(), config)
    }
}

/// In-memory store that can be told to fail batches, or to stall scans
/// so concurrent read-modify-write sequences overlap.
#[derive(Default)]
pub struct FaultyStore {
    inner: InMemoryKVStore,
    fail_writes: AtomicBool,
    scan_delay: Option<Duration>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slow_scans(delay: Duration) -> Self {
        Self {
            scan_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ScanResult {
        self.inner.prefix_scan(b"").unwrap_or_default()
    }
}

impl KeyValueStore for FaultyStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::IoError {
                message: "injected write failure".into(),
            });
        }
        self.inner.atomic_batch_write(operations)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StoreError> {
        if let Some(delay) = self.scan_delay {
            std::thread::sleep(delay);
        }
        self.inner.prefix_scan(prefix)
    }
}

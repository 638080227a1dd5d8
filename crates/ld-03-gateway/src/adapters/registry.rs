use crate::domain::config::{StorageBackend, StorageConfig};
use anyhow::Context;
use ld_01_identity::MessageSigningVerifier;
use ld_02_registry::{
    FileBackedKVStore, InMemoryKVStore, KeyValueStore, RegistrationApi, RegistrationService,
    RegistryConfig, RegistryDependencies, SystemTimeSource,
};
use std::sync::Arc;
use tracing::info;

fn service<S: KeyValueStore + 'static>(store: S, config: &RegistryConfig) -> Arc<dyn RegistrationApi> {
    Arc::new(RegistrationService::new(
        RegistryDependencies {
            store,
            clock: SystemTimeSource,
            identity: Arc::new(MessageSigningVerifier::new()),
        },
        config.clone(),
    ))
}

/// Open the configured store and wrap it in a `RegistrationService`.
pub fn build_registry(
    storage: &StorageConfig,
    registry: &RegistryConfig,
) -> anyhow::Result<Arc<dyn RegistrationApi>> {
    info!(
        backend = ?storage.backend,
        policy = ?registry.collision_policy,
        "[ld-03] Building registry"
    );

    match storage.backend {
        StorageBackend::Memory => Ok(service(InMemoryKVStore::new(), registry)),
        StorageBackend::File => {
            let path = storage
                .path
                .as_ref()
                .context("file storage requires a path")?;
            let store = FileBackedKVStore::open(path)
                .with_context(|| format!("opening registry file {}", path.display()))?;
            Ok(service(store, registry))
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::Rocksdb => {
            let path = storage
                .path
                .as_ref()
                .context("rocksdb storage requires a path")?;
            let store = ld_02_registry::RocksDbStore::open(ld_02_registry::RocksDbConfig {
                path: path.clone(),
                ..Default::default()
            })
            .with_context(|| format!("opening RocksDB at {}", path.display()))?;
            Ok(service(store, registry))
        }
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::Rocksdb => anyhow::bail!("built without the rocksdb feature"),
    }
}

//! Gateway configuration with validation.
//!
//! Every section has serde defaults, so a partial file (or none at all)
//! yields a working development setup: in-memory storage, accept-all
//! payments, plain-text logs at `info`.

use ld_02_registry::{CollisionPolicy, RegistryConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// One US cent in satoshi, the unit prices are derived from.
pub const USCENT: u64 = 2801;

/// Main gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub service: ServiceConfig,
    pub pricing: PricingConfig,
    pub payment: PaymentConfig,
    pub storage: StorageConfig,
    pub registry: RegistryConfig,
    pub limits: LimitsConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Name reported by the info route
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "lease-dns".to_string(),
        }
    }
}

/// Prices in satoshi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Per leased day (default: a tenth of a cent)
    pub register_per_day: u64,
    /// Per record-set replacement (default: a third of a cent)
    pub update: u64,
    /// Per release (default: same as update)
    pub delete: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            register_per_day: USCENT / 10,
            update: USCENT / 3,
            delete: USCENT / 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// When set, priced requests must present this token. When unset,
    /// every request is admitted.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Rocksdb,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Snapshot file (`file`) or database directory (`rocksdb`)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("storage backend {0:?} needs a path")]
    MissingStoragePath(StorageBackend),

    #[error("storage backend {0:?} is not compiled in")]
    BackendUnavailable(StorageBackend),

    #[error("lock_stripes must be between 1 and {max}, got {got}")]
    InvalidLockStripes { got: usize, max: usize },

    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

const MAX_LOCK_STRIPES: usize = 4096;

impl GatewayConfig {
    /// Defaults overridden by `LD_*` environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LD_SERVICE_NAME`
    /// - `LD_PRICE_REGISTER_PER_DAY`, `LD_PRICE_UPDATE`, `LD_PRICE_DELETE`
    /// - `LD_PAYMENT_TOKEN`
    /// - `LD_STORAGE_BACKEND` (`memory`, `file`, `rocksdb`), `LD_STORAGE_PATH`
    /// - `LD_COLLISION_POLICY` (`require_owner_proof`, `reject`, `overwrite`)
    /// - `LD_LOCK_STRIPES`
    /// - `LD_MAX_BODY_BYTES`
    /// - `LD_LOG_LEVEL`, `LD_JSON_LOGS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(name) = lookup("LD_SERVICE_NAME") {
            config.service.name = name;
        }

        set_parsed(&lookup, "LD_PRICE_REGISTER_PER_DAY", &mut config.pricing.register_per_day)?;
        set_parsed(&lookup, "LD_PRICE_UPDATE", &mut config.pricing.update)?;
        set_parsed(&lookup, "LD_PRICE_DELETE", &mut config.pricing.delete)?;

        config.payment.token = lookup("LD_PAYMENT_TOKEN").filter(|t| !t.is_empty());

        if let Some(value) = lookup("LD_STORAGE_BACKEND") {
            config.storage.backend = match value.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                "rocksdb" => StorageBackend::Rocksdb,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "LD_STORAGE_BACKEND",
                        value,
                    })
                }
            };
        }
        if let Some(path) = lookup("LD_STORAGE_PATH") {
            config.storage.path = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("LD_COLLISION_POLICY") {
            config.registry.collision_policy = match value.to_lowercase().as_str() {
                "require_owner_proof" => CollisionPolicy::RequireOwnerProof,
                "reject" => CollisionPolicy::Reject,
                "overwrite" => CollisionPolicy::Overwrite,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "LD_COLLISION_POLICY",
                        value,
                    })
                }
            };
        }
        set_parsed(&lookup, "LD_LOCK_STRIPES", &mut config.registry.lock_stripes)?;
        set_parsed(&lookup, "LD_MAX_BODY_BYTES", &mut config.limits.max_body_bytes)?;

        if let Some(level) = lookup("LD_LOG_LEVEL") {
            config.telemetry.log_level = level;
        }
        if let Some(value) = lookup("LD_JSON_LOGS") {
            config.telemetry.json_logs = value.eq_ignore_ascii_case("true") || value == "1";
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let backend = self.storage.backend;
        if backend != StorageBackend::Memory && self.storage.path.is_none() {
            return Err(ConfigError::MissingStoragePath(backend));
        }
        if backend == StorageBackend::Rocksdb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable(backend));
        }

        let stripes = self.registry.lock_stripes;
        if stripes == 0 || stripes > MAX_LOCK_STRIPES {
            return Err(ConfigError::InvalidLockStripes {
                got: stripes,
                max: MAX_LOCK_STRIPES,
            });
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        Ok(())
    }
}

fn set_parsed<V: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    target: &mut V,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value })?;
    }
    Ok(())
}

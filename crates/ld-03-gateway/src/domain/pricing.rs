//! Request pricing.

use super::config::PricingConfig;
use super::routes::Route;
use ld_02_registry::{DEFAULT_LEASE_DAYS, MAX_LEASE_DAYS, MIN_LEASE_DAYS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSchedule {
    pub register_per_day: u64,
    pub update: u64,
    pub delete: u64,
}

impl From<&PricingConfig> for PriceSchedule {
    fn from(config: &PricingConfig) -> Self {
        Self {
            register_per_day: config.register_per_day,
            update: config.update,
            delete: config.delete,
        }
    }
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self::from(&PricingConfig::default())
    }
}

#[derive(Deserialize)]
struct DaysField {
    #[serde(default = "default_days")]
    days: i64,
}

fn default_days() -> i64 {
    DEFAULT_LEASE_DAYS
}

impl PriceSchedule {
    /// Price of a request in satoshi, computed before the body is decoded.
    ///
    /// A register body whose `days` cannot be read or is out of range is
    /// priced 0; validation rejects it afterwards.
    pub fn price(&self, route: Route, body: &[u8]) -> u64 {
        match route {
            Route::Register => serde_json::from_slice::<DaysField>(body)
                .ok()
                .filter(|f| (MIN_LEASE_DAYS..=MAX_LEASE_DAYS).contains(&f.days))
                .map(|f| self.register_per_day.saturating_mul(f.days as u64))
                .unwrap_or(0),
            Route::Update => self.update,
            Route::Delete => self.delete,
            Route::Info | Route::Domains | Route::HostInfo => 0,
        }
    }

    /// Minimum price per route, for the info route.
    pub fn minimums(&self) -> Vec<(Route, u64)> {
        vec![
            (Route::Register, self.register_per_day),
            (Route::Update, self.update),
            (Route::Delete, self.delete),
        ]
    }
}

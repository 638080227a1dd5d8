use super::pricing::PriceSchedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePrice {
    pub minimum: u64,
}

/// Body of the info route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    /// Keyed by route path
    pub pricing: BTreeMap<String, RoutePrice>,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, prices: &PriceSchedule) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            pricing: prices
                .minimums()
                .into_iter()
                .map(|(route, minimum)| (route.path().to_string(), RoutePrice { minimum }))
                .collect(),
        }
    }
}

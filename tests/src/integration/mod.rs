//! Cross-crate lifecycle tests.

pub mod gateway_flows;
pub mod scenarios;
pub mod update_rules;

//! # Adapters
//!
//! Payment gates and registry construction from configuration.

mod payment;
mod registry;

pub use payment::{AcceptAllGate, StaticTokenGate, PAYMENT_TOKEN_HEADER};
pub use registry::build_registry;

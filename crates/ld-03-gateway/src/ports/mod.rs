//! # Ports Layer
//!
//! - `outbound.rs` - the payment collaborator the gateway runs before the registry

pub mod outbound;

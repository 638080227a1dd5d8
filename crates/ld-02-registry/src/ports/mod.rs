//! # Ports Layer
//!
//! - `inbound.rs` - Driving ports (API exposed to the boundary layer)
//! - `outbound.rs` - Driven ports (storage and clock the service depends on)

pub mod inbound;
pub mod outbound;

//! # Ports Layer
//!
//! - **Inbound (Driving)**: the verification API other subsystems call

pub mod inbound;

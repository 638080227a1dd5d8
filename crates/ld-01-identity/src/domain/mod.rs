//! # Domain Layer
//!
//! Token codec and signed-message primitives. No I/O.

pub mod errors;
pub mod message;
pub mod pkh;

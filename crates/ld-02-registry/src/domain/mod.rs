//! # Domain Layer
//!
//! Entities, commands, validation rules and errors. No I/O.

pub mod commands;
pub mod config;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod validation;

pub use commands::{DeleteCommand, RegisterCommand, SignedPayload, UpdateCommand};
pub use config::{CollisionPolicy, RegistryConfig};
pub use constants::*;
pub use entities::*;
pub use errors::*;
pub use validation::*;

//! # Domain Layer
//!
//! Routes, request schemas, pricing, responses and configuration.

pub mod config;
pub mod errors;
pub mod headers;
pub mod info;
pub mod pricing;
pub mod requests;
pub mod response;
pub mod routes;

pub use config::*;
pub use errors::{PaymentError, TelemetryError};
pub use headers::Headers;
pub use info::{RoutePrice, ServiceInfo};
pub use pricing::PriceSchedule;
pub use requests::*;
pub use response::{status, ApiResponse, ResponseBody};
pub use routes::{Route, SIGNATURE_HEADER};

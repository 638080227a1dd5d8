//! # Gateway (ld-03)
//!
//! The boundary stage of Lease-DNS. Turns `(path, headers, body)` into a
//! priced, paid, decoded registry call and classifies the outcome. The HTTP
//! transport itself lives outside this crate; anything that can hand over
//! those three values can serve the API.
//!
//! ## Routes
//!
//! | Path | Price | Result |
//! |------|-------|--------|
//! | `/` | free | `ServiceInfo` |
//! | `/domains` | free | sorted names, expired included |
//! | `/host.register` | `register_per_day × days` | `true` |
//! | `/host.update` | flat | `true` (signed by owner) |
//! | `/host.delete` | flat | `true` (signed by owner) |
//! | `/host.info` | free | lease and records of a live name |
//!
//! Signatures travel in the `X-Bitcoin-Sig` header and cover the exact body
//! bytes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-export public API
pub use adapters::{build_registry, AcceptAllGate, StaticTokenGate, PAYMENT_TOKEN_HEADER};
pub use domain::{
    status, ApiResponse, ConfigError, DeleteRequest, GatewayConfig, Headers, LimitsConfig,
    LookupRequest, PaymentConfig, PaymentError, PriceSchedule, PricingConfig, RegisterRequest,
    ResponseBody, Route, RoutePrice, ServiceConfig, ServiceInfo, StorageBackend, StorageConfig,
    TelemetryConfig, TelemetryError, UpdateRequest, SIGNATURE_HEADER, USCENT,
};
pub use ports::outbound::{PaymentGate, PaymentReceipt};
pub use service::Gateway;
pub use telemetry::init_tracing;

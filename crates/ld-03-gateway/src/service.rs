//! # Gateway Service
//!
//! The boundary stage in front of the registry. Each request goes through:
//!
//! ```text
//! route → price → payment gate → decode → registry (blocking pool) → ApiResponse
//! ```
//!
//! Nothing past the gate runs for a refused request, and every failure on
//! the way out is classified into a status code; a panicking registry call
//! surfaces as a 500, never as a crashed task.

use crate::adapters::{build_registry, AcceptAllGate, StaticTokenGate};
use crate::domain::config::GatewayConfig;
use crate::domain::headers::Headers;
use crate::domain::info::ServiceInfo;
use crate::domain::pricing::PriceSchedule;
use crate::domain::requests::{decode, DeleteRequest, LookupRequest, RegisterRequest, UpdateRequest};
use crate::domain::response::{status, ApiResponse};
use crate::domain::routes::{Route, SIGNATURE_HEADER};
use crate::ports::outbound::PaymentGate;
use ld_02_registry::{RegistrationApi, RegistryError, SignedPayload, ValidationError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct Gateway {
    registry: Arc<dyn RegistrationApi>,
    gate: Arc<dyn PaymentGate>,
    prices: PriceSchedule,
    info: ServiceInfo,
    max_body_bytes: usize,
}

impl Gateway {
    pub fn new(
        registry: Arc<dyn RegistrationApi>,
        gate: Arc<dyn PaymentGate>,
        prices: PriceSchedule,
    ) -> Self {
        Self {
            info: ServiceInfo::new("lease-dns", &prices),
            registry,
            gate,
            prices,
            max_body_bytes: usize::MAX,
        }
    }

    /// Build the registry, payment gate and pricing described by `config`.
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let registry = build_registry(&config.storage, &config.registry)?;
        let gate: Arc<dyn PaymentGate> = match &config.payment.token {
            Some(token) => Arc::new(StaticTokenGate::new(token.clone())),
            None => {
                warn!("[ld-03] No payment token configured, admitting every request");
                Arc::new(AcceptAllGate)
            }
        };
        let prices = PriceSchedule::from(&config.pricing);

        Ok(Self {
            info: ServiceInfo::new(config.service.name.clone(), &prices),
            registry,
            gate,
            prices,
            max_body_bytes: config.limits.max_body_bytes,
        })
    }

    pub fn info(&self) -> &ServiceInfo {
        &self.info
    }

    pub fn prices(&self) -> &PriceSchedule {
        &self.prices
    }

    /// Handle one request. Never fails: every outcome is a response.
    pub async fn handle(&self, path: &str, headers: &Headers, body: Vec<u8>) -> ApiResponse {
        let Some(route) = Route::parse(path) else {
            debug!(path, "[ld-03] Unknown route");
            return ApiResponse::not_found(path);
        };

        if body.len() > self.max_body_bytes {
            return ApiResponse::text(
                status::BAD_REQUEST,
                format!("Body exceeds {} bytes", self.max_body_bytes),
            );
        }

        let price = self.prices.price(route, &body);
        let receipt = match self.gate.admit(route, price, headers).await {
            Ok(receipt) => receipt,
            Err(e) => {
                info!(route = %route, price, error = %e, "[ld-03] Payment refused");
                return ApiResponse::from(&e);
            }
        };

        if route == Route::Info {
            return match serde_json::to_value(&self.info) {
                Ok(value) => ApiResponse::json(value),
                Err(e) => {
                    error!(error = %e, "[ld-03] Failed to encode service info");
                    ApiResponse::internal_error()
                }
            };
        }

        let registry = Arc::clone(&self.registry);
        let signature = headers.get(SIGNATURE_HEADER).map(str::to_owned);
        let joined = tokio::task::spawn_blocking(move || {
            dispatch(registry.as_ref(), route, &body, signature.as_deref())
        })
        .await;

        let response = match joined {
            Ok(Ok(value)) => ApiResponse::json(value),
            Ok(Err(e)) => ApiResponse::from(&e),
            Err(e) => {
                error!(route = %route, error = %e, "[ld-03] Registry task aborted");
                ApiResponse::from(&RegistryError::Storage(e.to_string()))
            }
        };

        debug!(
            route = %route,
            status = response.status,
            price = receipt.price,
            paid = receipt.paid,
            "[ld-03] Request handled"
        );
        response
    }
}

/// Decode `body` for `route` and run it against the registry.
fn dispatch(
    registry: &dyn RegistrationApi,
    route: Route,
    body: &[u8],
    signature: Option<&str>,
) -> Result<Value, RegistryError> {
    let signed = SignedPayload::new(body, signature);
    match route {
        Route::Info => Err(ValidationError::MalformedPayload("info takes no body".into()).into()),
        Route::Domains => Ok(Value::from(registry.list_names()?)),
        Route::Register => {
            let req: RegisterRequest = decode(body)?;
            registry.register(req.into(), signed)?;
            Ok(Value::Bool(true))
        }
        Route::Update => {
            let req: UpdateRequest = decode(body)?;
            registry.update(req.into(), signed)?;
            Ok(Value::Bool(true))
        }
        Route::Delete => {
            let req: DeleteRequest = decode(body)?;
            registry.delete(req.into(), signed)?;
            Ok(Value::Bool(true))
        }
        Route::HostInfo => {
            let req: LookupRequest = decode(body)?;
            let info = registry.lookup_host(&req.name)?;
            serde_json::to_value(info).map_err(|e| RegistryError::Storage(e.to_string()))
        }
    }
}

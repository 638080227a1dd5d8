//! Outbound ports for the gateway.

use crate::domain::errors::PaymentError;
use crate::domain::headers::Headers;
use crate::domain::routes::Route;
use async_trait::async_trait;

/// Proof that a request was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub price: u64,
    pub paid: u64,
}

/// Admits or rejects a request for a computed price.
///
/// Runs before the request body is decoded. A rejected request never
/// reaches the registry. How payment is proven is entirely the gate's
/// business; the registry only ever sees admitted requests.
#[async_trait]
pub trait PaymentGate: Send + Sync {
    async fn admit(
        &self,
        route: Route,
        price: u64,
        headers: &Headers,
    ) -> Result<PaymentReceipt, PaymentError>;
}

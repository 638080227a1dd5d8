use crate::domain::errors::PaymentError;
use crate::domain::headers::Headers;
use crate::domain::routes::Route;
use crate::ports::outbound::{PaymentGate, PaymentReceipt};
use async_trait::async_trait;
use tracing::debug;

/// Header `StaticTokenGate` reads its token from.
pub const PAYMENT_TOKEN_HEADER: &str = "X-Payment-Token";

/// Admits everything as fully paid. Development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllGate;

#[async_trait]
impl PaymentGate for AcceptAllGate {
    async fn admit(
        &self,
        _route: Route,
        price: u64,
        _headers: &Headers,
    ) -> Result<PaymentReceipt, PaymentError> {
        Ok(PaymentReceipt { price, paid: price })
    }
}

/// Admits priced requests that carry a fixed shared token.
///
/// Free requests are always admitted.
#[derive(Debug, Clone)]
pub struct StaticTokenGate {
    token: String,
}

impl StaticTokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl PaymentGate for StaticTokenGate {
    async fn admit(
        &self,
        route: Route,
        price: u64,
        headers: &Headers,
    ) -> Result<PaymentReceipt, PaymentError> {
        if price == 0 {
            return Ok(PaymentReceipt { price, paid: 0 });
        }
        match headers.get(PAYMENT_TOKEN_HEADER) {
            None => Err(PaymentError::Required { price }),
            Some(token) if token == self.token => Ok(PaymentReceipt { price, paid: price }),
            Some(_) => {
                debug!(route = %route, price, "[ld-03] Payment token mismatch");
                Err(PaymentError::Rejected("unknown payment token".into()))
            }
        }
    }
}

use thiserror::Error;

/// Why the payment gate refused a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment required: {price} satoshi")]
    Required { price: u64 },

    #[error("Payment rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

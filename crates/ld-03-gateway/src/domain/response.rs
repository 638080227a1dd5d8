//! # Responses
//!
//! Every outcome of `Gateway::handle` is an `ApiResponse`. Registry errors
//! are mapped by kind; storage failures never expose their cause.

use super::errors::PaymentError;
use ld_02_registry::{ErrorKind, RegistryError};
use serde_json::Value;
use std::fmt;

pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const PAYMENT_REQUIRED: u16 = 402;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_ERROR: u16 = 500;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: status::OK,
            body: ResponseBody::Json(value),
        }
    }

    /// The `true` body returned by successful mutations.
    pub fn success() -> Self {
        Self::json(Value::Bool(true))
    }

    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(text.into()),
        }
    }

    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::text(status::NOT_FOUND, format!("Not found: {what}"))
    }

    pub fn internal_error() -> Self {
        Self::text(status::INTERNAL_ERROR, "Internal server error")
    }

    pub fn is_success(&self) -> bool {
        self.status == status::OK
    }

    pub fn content_type(&self) -> &'static str {
        match self.body {
            ResponseBody::Json(_) => "application/json",
            ResponseBody::Text(_) => "text/plain",
        }
    }
}

impl From<&RegistryError> for ApiResponse {
    fn from(err: &RegistryError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiResponse::text(status::BAD_REQUEST, err.to_string()),
            ErrorKind::Auth => ApiResponse::text(status::FORBIDDEN, err.to_string()),
            ErrorKind::NotFound => ApiResponse::text(status::NOT_FOUND, err.to_string()),
            ErrorKind::Storage => ApiResponse::internal_error(),
        }
    }
}

impl From<&PaymentError> for ApiResponse {
    fn from(err: &PaymentError) -> Self {
        ApiResponse::text(status::PAYMENT_REQUIRED, err.to_string())
    }
}

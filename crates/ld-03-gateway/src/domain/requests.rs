//! # Request Schemas
//!
//! One typed schema per route. `decode` is the single step that turns raw
//! body bytes into a request or a `ValidationError`; field-level checks
//! (name pattern, days, records) stay with the registry.

use ld_02_registry::{
    DeleteCommand, RawRecord, RegisterCommand, UpdateCommand, ValidationError,
    DEFAULT_LEASE_DAYS,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn default_days() -> i64 {
    DEFAULT_LEASE_DAYS
}

/// `POST /host.register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default)]
    pub pkh: Option<String>,
    #[serde(default, alias = "records")]
    pub hosts: Vec<RawRecord>,
}

/// `POST /host.update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRequest {
    pub name: String,
    #[serde(default, alias = "records")]
    pub hosts: Vec<RawRecord>,
}

/// `POST /host.delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteRequest {
    pub name: String,
    pub pkh: String,
}

/// `POST /host.info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupRequest {
    pub name: String,
}

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedPayload(e.to_string()))
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(req: RegisterRequest) -> Self {
        RegisterCommand {
            name: req.name,
            days: req.days,
            owner: req.pkh,
            records: req.hosts,
        }
    }
}

impl From<UpdateRequest> for UpdateCommand {
    fn from(req: UpdateRequest) -> Self {
        UpdateCommand {
            name: req.name,
            records: req.hosts,
        }
    }
}

impl From<DeleteRequest> for DeleteCommand {
    fn from(req: DeleteRequest) -> Self {
        DeleteCommand {
            name: req.name,
            owner: req.pkh,
        }
    }
}

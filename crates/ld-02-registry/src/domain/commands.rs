//! # Commands
//!
//! Unvalidated inputs to `RegistrationApi`. Fields are carried as submitted;
//! the service validates every one of them before touching storage.

use super::constants::DEFAULT_LEASE_DAYS;
use super::entities::RawRecord;

/// Claim (or re-claim) a name for `days` and bind `records` to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterCommand {
    pub name: String,
    pub days: i64,
    /// Owner token. `None` registers an anonymous lease.
    pub owner: Option<String>,
    pub records: Vec<RawRecord>,
}

impl RegisterCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            days: DEFAULT_LEASE_DAYS,
            owner: None,
            records: Vec::new(),
        }
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn records(mut self, records: Vec<RawRecord>) -> Self {
        self.records = records;
        self
    }
}

/// Replace the record set of a live, owned lease.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCommand {
    pub name: String,
    pub records: Vec<RawRecord>,
}

/// Release a name and its records. `owner` is the identity the caller
/// claims to be; it must match the lease's recorded owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteCommand {
    pub name: String,
    pub owner: String,
}

/// The exact request bytes and the signature presented over them.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignedPayload<'a> {
    pub body: &'a [u8],
    pub signature: Option<&'a str>,
}

impl<'a> SignedPayload<'a> {
    pub fn new(body: &'a [u8], signature: Option<&'a str>) -> Self {
        Self { body, signature }
    }

    /// A payload with no signature attached.
    pub fn unsigned(body: &'a [u8]) -> Self {
        Self {
            body,
            signature: None,
        }
    }
}

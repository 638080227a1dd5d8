//! # Domain Entities
//!
//! Leases, host records and the validated batch that replaces a name's
//! record set.

use super::constants::{MAX_LEASE_DAYS, MIN_LEASE_DAYS, SECONDS_PER_DAY};
use super::errors::ValidationError;
use super::validation::validate_name;
use ld_01_identity::OwnerPkh;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

// =============================================================================
// Names and leases
// =============================================================================

/// A registrable name: 1-64 characters matching `[A-Za-z0-9][A-Za-z0-9-]*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        validate_name(name)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DomainName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

/// Lease duration in whole days, within `[1, 365]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaseDays(u16);

impl LeaseDays {
    pub fn new(days: i64) -> Result<Self, ValidationError> {
        if !(MIN_LEASE_DAYS..=MAX_LEASE_DAYS).contains(&days) {
            return Err(ValidationError::InvalidDays(days));
        }
        Ok(Self(days as u16))
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    pub fn as_seconds(&self) -> u64 {
        u64::from(self.0) * SECONDS_PER_DAY
    }
}

/// A name's registration: who controls it and for how long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub name: DomainName,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// `None` marks an anonymous lease: readable and expirable, never mutable.
    pub owner: Option<OwnerPkh>,
}

impl Lease {
    /// A lease is live strictly before its expiry.
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }

    pub fn is_anonymous(&self) -> bool {
        self.owner.is_none()
    }
}

// =============================================================================
// Records
// =============================================================================

/// Supported record types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            other => Err(ValidationError::InvalidRecType(other.to_owned())),
        }
    }
}

/// A record descriptor as submitted, before validation.
///
/// Wire shape: `{"ttl": 60, "rec_type": "A", "address": "10.0.0.1"}`.
/// Compact form: `"60,A,10.0.0.1"` (ttl in seconds, then type, then address).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub ttl: i64,
    pub rec_type: String,
    pub address: String,
}

impl RawRecord {
    pub fn new(ttl: i64, rec_type: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            ttl,
            rec_type: rec_type.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.ttl, self.rec_type, self.address)
    }
}

impl FromStr for RawRecord {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        let (Some(ttl), Some(rec_type), Some(address)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationError::MalformedPayload(format!(
                "expected ttl,rec_type,address, got {s:?}"
            )));
        };

        let ttl = ttl
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::MalformedPayload(format!("ttl is not an integer: {ttl:?}")))?;

        Ok(Self::new(ttl, rec_type.trim(), address.trim()))
    }
}

/// A validated record ready for storage. `address` is held parsed, so its
/// textual form is always canonical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub name: DomainName,
    pub rec_type: RecordType,
    pub address: IpAddr,
    pub ttl: u32,
}

impl HostRecord {
    /// The `(name, rec_type, address, ttl)` row as stored.
    pub fn as_tuple(&self) -> (&str, &'static str, String, u32) {
        (
            self.name.as_str(),
            self.rec_type.as_str(),
            self.address.to_string(),
            self.ttl,
        )
    }
}

/// The complete, validated record set for one name.
///
/// Only `validation::validate_batch` builds one, so holding a `RecordBatch`
/// means every record in it passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordBatch {
    name: DomainName,
    records: Vec<HostRecord>,
}

impl RecordBatch {
    pub(crate) fn new(name: DomainName, records: Vec<HostRecord>) -> Self {
        Self { name, records }
    }

    /// An empty record set for `name`.
    pub fn empty(name: DomainName) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A live lease together with its current record set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    pub lease: Lease,
    pub records: Vec<HostRecord>,
}

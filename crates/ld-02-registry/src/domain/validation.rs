//! # Input Validation
//!
//! Pure functions that turn submitted values into domain types or reject
//! them. Nothing here touches storage, which is what lets the service run
//! all validation before its first write.
//!
//! - `validate_name` / `validate_owner`: request-level fields
//! - `validate_record`: one record descriptor (type, TTL, address literal)
//! - `validate_batch`: a whole record set, all-or-nothing

use super::constants::{MAX_NAME_LEN, MAX_RECORDS_PER_NAME, MAX_TTL, MIN_NAME_LEN, MIN_TTL};
use super::entities::{DomainName, HostRecord, RawRecord, RecordBatch, RecordType};
use super::errors::ValidationError;
use ld_01_identity::OwnerPkh;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// ============================================================================
// Request fields
// ============================================================================

/// Check a name against `[A-Za-z0-9][A-Za-z0-9-]*`, 1-64 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.len() < MIN_NAME_LEN {
        return Err(ValidationError::InvalidName {
            reason: "name is empty",
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::InvalidName {
            reason: "name exceeds 64 characters",
        });
    }

    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidName {
            reason: "name must start with a letter or digit",
        });
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidName {
            reason: "name may only contain letters, digits and '-'",
        });
    }
    Ok(())
}

/// Decode an optional owner token. Absent means an anonymous lease.
pub fn validate_owner(owner: Option<&str>) -> Result<Option<OwnerPkh>, ValidationError> {
    owner
        .map(|text| OwnerPkh::parse(text).map_err(ValidationError::InvalidOwner))
        .transpose()
}

// ============================================================================
// Records
// ============================================================================

/// Validate a single record descriptor for `name`.
///
/// Checks run in order TTL, record type, address; the first failure is
/// returned. On success the address is stored parsed, which canonicalizes
/// its textual form (`0:0::1` becomes `::1`).
pub fn validate_record(name: &DomainName, raw: &RawRecord) -> Result<HostRecord, ValidationError> {
    if !(MIN_TTL..=MAX_TTL).contains(&raw.ttl) {
        return Err(ValidationError::InvalidTtl(raw.ttl));
    }

    let rec_type: RecordType = raw.rec_type.parse()?;

    let address = match rec_type {
        RecordType::A => raw.address.parse::<Ipv4Addr>().map(IpAddr::V4).ok(),
        RecordType::Aaaa => raw.address.parse::<Ipv6Addr>().map(IpAddr::V6).ok(),
    }
    .ok_or_else(|| ValidationError::InvalidAddress {
        rec_type,
        address: raw.address.clone(),
    })?;

    Ok(HostRecord {
        name: name.clone(),
        rec_type,
        address,
        ttl: raw.ttl as u32,
    })
}

/// Validate a proposed record set for `name`.
///
/// The first invalid record aborts the batch and its error is the only
/// result; accepted records are never returned alongside a rejection. An
/// empty input is valid and yields an empty batch.
pub fn validate_batch(name: &DomainName, raw: &[RawRecord]) -> Result<RecordBatch, ValidationError> {
    if raw.len() > MAX_RECORDS_PER_NAME {
        return Err(ValidationError::TooManyRecords {
            count: raw.len(),
            max: MAX_RECORDS_PER_NAME,
        });
    }

    let records = raw
        .iter()
        .map(|r| validate_record(name, r))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecordBatch::new(name.clone(), records))
}

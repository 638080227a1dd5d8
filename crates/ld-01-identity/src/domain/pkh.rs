//! # Owner Tokens (public-key-hash)
//!
//! An owner token is the base58check encoding of `version || HASH160(pubkey)`,
//! the same shape as a pay-to-pubkey-hash address. The registry never sees a
//! public key directly: ownership is proven by recovering the key from a
//! signed message and re-deriving this token.

use super::errors::IdentityError;
use k256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Shortest accepted token text.
pub const MIN_TOKEN_LEN: usize = 20;

/// Longest accepted token text.
pub const MAX_TOKEN_LEN: usize = 40;

/// RIPEMD-160 digest length.
pub const HASH160_LEN: usize = 20;

/// Version byte for mainnet pubkey-hash tokens.
pub const MAINNET_VERSION: u8 = 0x00;

/// Version byte for testnet pubkey-hash tokens.
pub const TESTNET_VERSION: u8 = 0x6f;

/// `RIPEMD160(SHA256(data))`
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; HASH160_LEN];
    out.copy_from_slice(&digest);
    out
}

/// A decoded, checksum-verified owner token.
///
/// Serializes as its textual form, so persisted leases carry exactly what
/// the registrant submitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerPkh {
    text: String,
    version: u8,
    hash: [u8; HASH160_LEN],
}

impl OwnerPkh {
    /// Parse and validate a textual token.
    ///
    /// # Errors
    /// * `InvalidLength` - text shorter than 20 or longer than 40 characters
    /// * `InvalidEncoding` - bad base58 alphabet or checksum
    /// * `InvalidPayload` - payload is not version byte + 20-byte hash
    pub fn parse(text: &str) -> Result<Self, IdentityError> {
        let len = text.len();
        if !(MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&len) {
            return Err(IdentityError::InvalidLength {
                len,
                min: MIN_TOKEN_LEN,
                max: MAX_TOKEN_LEN,
            });
        }

        let payload = bs58::decode(text)
            .with_check(None)
            .into_vec()
            .map_err(|e| IdentityError::InvalidEncoding(e.to_string()))?;

        if payload.len() != 1 + HASH160_LEN {
            return Err(IdentityError::InvalidPayload(payload.len()));
        }

        let mut hash = [0u8; HASH160_LEN];
        hash.copy_from_slice(&payload[1..]);

        Ok(Self {
            text: text.to_owned(),
            version: payload[0],
            hash,
        })
    }

    /// Build a token from its raw parts.
    pub fn from_hash160(version: u8, hash: [u8; HASH160_LEN]) -> Self {
        let mut payload = Vec::with_capacity(1 + HASH160_LEN);
        payload.push(version);
        payload.extend_from_slice(&hash);

        Self {
            text: bs58::encode(payload).with_check().into_string(),
            version,
            hash,
        }
    }

    /// Derive the token controlled by `key`.
    ///
    /// `compressed` selects the SEC1 serialization that gets hashed; a key
    /// yields two distinct tokens depending on it.
    pub fn from_verifying_key(key: &VerifyingKey, version: u8, compressed: bool) -> Self {
        let point = key.to_encoded_point(compressed);
        Self::from_hash160(version, hash160(point.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash160(&self) -> &[u8; HASH160_LEN] {
        &self.hash
    }

    /// True if both tokens name the same key hash under the same version.
    pub fn same_identity(&self, other: &OwnerPkh) -> bool {
        self.version == other.version && self.hash == other.hash
    }
}

impl fmt::Display for OwnerPkh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for OwnerPkh {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OwnerPkh {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OwnerPkh> for String {
    fn from(value: OwnerPkh) -> Self {
        value.text
    }
}

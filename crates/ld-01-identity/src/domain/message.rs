//! # Signed Messages (secp256k1)
//!
//! Pure domain logic for the compact, recoverable message signatures that
//! wallets produce with "sign message".
//!
//! ## Format
//!
//! - Digest: `SHA256d(varint(24) || "Bitcoin Signed Message:\n" || varint(len) || payload)`
//! - Token: base64 of `header || r || s` (65 bytes)
//! - Header: `27 + recovery_id`, plus 4 when the signer's key is compressed
//!
//! The signature commits to the exact payload bytes. Re-serializing a JSON
//! body before verification would break it, so callers must hand over the
//! body as received.

use super::errors::IdentityError;
use super::pkh::OwnerPkh;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

/// Prefix mixed into every digest so a message signature can never double
/// as a transaction signature.
pub const MESSAGE_MAGIC: &[u8] = b"Bitcoin Signed Message:\n";

/// Length of a decoded compact signature.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

const HEADER_BASE: u8 = 27;
const HEADER_COMPRESSED_FLAG: u8 = 4;
const HEADER_MAX: u8 = 34;

/// Double SHA-256.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Digest that a message signature commits to.
pub fn message_digest(payload: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(MESSAGE_MAGIC.len() + payload.len() + 10);
    write_varint(&mut data, MESSAGE_MAGIC.len() as u64);
    data.extend_from_slice(MESSAGE_MAGIC);
    write_varint(&mut data, payload.len() as u64);
    data.extend_from_slice(payload);
    sha256d(&data)
}

fn write_varint(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// A decoded compact recoverable signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactSignature {
    header: u8,
    rs: [u8; 64],
}

impl CompactSignature {
    /// Decode a base64 signature token.
    pub fn decode(token: &str) -> Result<Self, IdentityError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(IdentityError::MissingSignature);
        }

        let bytes = STANDARD
            .decode(token)
            .map_err(|_| IdentityError::InvalidSignatureFormat)?;
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(IdentityError::InvalidSignatureFormat);
        }

        let header = bytes[0];
        if !(HEADER_BASE..=HEADER_MAX).contains(&header) {
            return Err(IdentityError::InvalidHeader(header));
        }

        let mut rs = [0u8; 64];
        rs.copy_from_slice(&bytes[1..]);
        Ok(Self { header, rs })
    }

    /// Encode as a base64 token.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(COMPACT_SIGNATURE_LEN);
        bytes.push(self.header);
        bytes.extend_from_slice(&self.rs);
        STANDARD.encode(bytes)
    }

    /// Whether the signer's public key is hashed in compressed form.
    pub fn is_compressed(&self) -> bool {
        self.header >= HEADER_BASE + HEADER_COMPRESSED_FLAG
    }

    fn recovery_id(&self) -> Result<RecoveryId, IdentityError> {
        RecoveryId::from_byte((self.header - HEADER_BASE) & 0x03)
            .ok_or(IdentityError::InvalidHeader(self.header))
    }
}

/// Recover the public key that signed `payload`.
///
/// High-S signatures are normalized first (flipping the recovery parity),
/// since the underlying verifier only accepts low-S form.
pub fn recover_signer(
    payload: &[u8],
    signature: &CompactSignature,
) -> Result<VerifyingKey, IdentityError> {
    let digest = message_digest(payload);

    let sig =
        Signature::from_slice(&signature.rs).map_err(|_| IdentityError::InvalidSignatureFormat)?;
    let recovery_id = signature.recovery_id()?;

    let (sig, recovery_id) = match sig.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (sig, recovery_id),
    };

    VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| IdentityError::RecoveryFailed)
}

/// Verify that `signature` over `payload` was produced by the key behind
/// `claimed`.
pub fn verify_message(
    payload: &[u8],
    signature: &str,
    claimed: &OwnerPkh,
) -> Result<(), IdentityError> {
    let compact = CompactSignature::decode(signature)?;
    let key = recover_signer(payload, &compact)?;
    let actual = OwnerPkh::from_verifying_key(&key, claimed.version(), compact.is_compressed());

    if !actual.same_identity(claimed) {
        return Err(IdentityError::SignerMismatch {
            expected: claimed.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Sign `payload` the way a wallet's "sign message" does.
///
/// Clients sign the exact request body they are about to send and attach
/// the returned token alongside it.
pub fn sign_message(
    key: &SigningKey,
    payload: &[u8],
    compressed: bool,
) -> Result<String, IdentityError> {
    let digest = message_digest(payload);
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .map_err(|e| IdentityError::SigningFailed(e.to_string()))?;

    let mut header = HEADER_BASE + recovery_id.to_byte();
    if compressed {
        header += HEADER_COMPRESSED_FLAG;
    }

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&sig.to_bytes());
    Ok(CompactSignature { header, rs }.encode())
}

// =============================================================================
// TEST HELPERS
// =============================================================================

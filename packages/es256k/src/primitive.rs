//! secp256k1 ECDSA primitive used by the signing methods
//!
//! The signing methods never do curve arithmetic themselves. They hand a
//! digest and a key to a [`CurvePrimitive`] and get back either a raw
//! `R || S || V` signature or a yes/no verification answer.

use k256::{
    FieldBytes,
    ecdsa::{
        Error as EcdsaError, RecoveryId, Signature, SigningKey, VerifyingKey,
        signature::hazmat::PrehashVerifier,
    },
};
use std::fmt;

/// Length of a single big-endian scalar (R or S).
pub const SCALAR_LEN: usize = 32;

/// Length of the raw `R || S || V` signature produced by the primitive.
pub const RAW_SIGNATURE_LEN: usize = 2 * SCALAR_LEN + 1;

/// Raw recoverable signature: R (32) || S (32) || recovery id (1).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSignature([u8; RAW_SIGNATURE_LEN]);

impl RawSignature {
    /// Wrap raw `R || S || V` bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RAW_SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// All 65 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAW_SIGNATURE_LEN] {
        &self.0
    }

    /// Big-endian R.
    #[must_use]
    pub fn r(&self) -> &[u8] {
        &self.0[..SCALAR_LEN]
    }

    /// Big-endian S.
    #[must_use]
    pub fn s(&self) -> &[u8] {
        &self.0[SCALAR_LEN..2 * SCALAR_LEN]
    }

    /// Recovery id byte (0 or 1 for signatures produced here).
    #[must_use]
    pub const fn recovery_byte(&self) -> u8 {
        self.0[RAW_SIGNATURE_LEN - 1]
    }

    /// Reconstruct the signer's public key from the signature and digest.
    ///
    /// This is a capability of the curve primitive. The signing methods do not
    /// use it when verifying; they check R and S against a caller-supplied key.
    ///
    /// # Errors
    /// Fails if the recovery byte is out of range, R/S are not valid scalars,
    /// or no point on the curve matches.
    pub fn recover_verifying_key(&self, digest: &[u8]) -> Result<VerifyingKey, EcdsaError> {
        let recovery_id = RecoveryId::from_byte(self.recovery_byte()).ok_or_else(EcdsaError::new)?;
        let signature = Signature::from_slice(&self.0[..2 * SCALAR_LEN])?;
        VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSignature").field(&hex::encode(self.0)).finish()
    }
}

impl fmt::Display for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Boundary to an ECDSA implementation over secp256k1.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait CurvePrimitive: Send + Sync + 'static {
    /// Sign a message digest, producing `R || S || V`.
    ///
    /// # Errors
    /// Returns the primitive's own error; callers are expected to hide it.
    fn sign_digest(&self, key: &SigningKey, digest: &[u8]) -> Result<RawSignature, EcdsaError>;

    /// Check big-endian `r`/`s` against `digest` under `key`.
    fn verify_digest(&self, key: &VerifyingKey, r: &[u8], s: &[u8], digest: &[u8]) -> bool;
}

/// Pure Rust secp256k1 ECDSA from the `k256` crate.
///
/// Signing is deterministic (RFC 6979) and S is always low-S normalized.
/// Verification accepts both the low and the high form of S.
#[derive(Debug, Clone, Copy, Default)]
pub struct K256;

impl CurvePrimitive for K256 {
    fn sign_digest(&self, key: &SigningKey, digest: &[u8]) -> Result<RawSignature, EcdsaError> {
        let (signature, recovery_id) = key.sign_prehash_recoverable(digest)?;

        let mut raw = [0u8; RAW_SIGNATURE_LEN];
        raw[..2 * SCALAR_LEN].copy_from_slice(&signature.to_bytes());
        raw[2 * SCALAR_LEN] = recovery_id.to_byte();
        Ok(RawSignature(raw))
    }

    fn verify_digest(&self, key: &VerifyingKey, r: &[u8], s: &[u8], digest: &[u8]) -> bool {
        if r.len() != SCALAR_LEN || s.len() != SCALAR_LEN {
            return false;
        }

        // zero or >= n is never a valid scalar
        let Ok(signature) =
            Signature::from_scalars(FieldBytes::clone_from_slice(r), FieldBytes::clone_from_slice(s))
        else {
            return false;
        };

        // accept any s in [1, n), not only the low half
        let signature = signature.normalize_s().unwrap_or(signature);
        key.verify_prehash(digest, &signature).is_ok()
    }
}

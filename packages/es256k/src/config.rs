//! Static configuration of a secp256k1 signing method

use crate::{
    error::{JwtError, JwtResult},
    hash::HashAlgorithm,
    primitive::{RAW_SIGNATURE_LEN, SCALAR_LEN},
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Layout of the signature bytes placed in the JWT signature segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureShape {
    /// R || S (64 bytes)
    RS,
    /// R || S || V (65 bytes), V being the recovery id
    RSV,
}

impl SignatureShape {
    /// Number of bytes this shape keeps from the raw signature.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::RS => 2 * SCALAR_LEN,
            Self::RSV => RAW_SIGNATURE_LEN,
        }
    }

    /// Truncate a raw `R || S || V` signature to this shape.
    #[must_use]
    pub fn apply(self, raw: &[u8; RAW_SIGNATURE_LEN]) -> &[u8] {
        &raw[..self.byte_len()]
    }
}

/// Immutable description of one signing method variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningMethodConfig {
    /// `alg` header value, e.g. `ES256K`
    pub alg: Cow<'static, str>,
    /// Hash applied to the signing input
    #[serde(default = "default_hash")]
    pub hash: HashAlgorithm,
    /// Output layout of the signature segment
    pub shape: SignatureShape,
    /// Expected decoded signature length in bytes
    pub signature_len: usize,
}

fn default_hash() -> HashAlgorithm {
    HashAlgorithm::Sha256
}

impl SigningMethodConfig {
    /// `ES256K`: SHA-256, R || S.
    #[must_use]
    pub const fn es256k() -> Self {
        Self {
            alg: Cow::Borrowed("ES256K"),
            hash: HashAlgorithm::Sha256,
            shape: SignatureShape::RS,
            signature_len: 2 * SCALAR_LEN,
        }
    }

    /// `ES256K-R`: SHA-256, R || S || V.
    #[must_use]
    pub const fn es256k_r() -> Self {
        Self {
            alg: Cow::Borrowed("ES256K-R"),
            hash: HashAlgorithm::Sha256,
            shape: SignatureShape::RSV,
            signature_len: RAW_SIGNATURE_LEN,
        }
    }

    /// Build and validate a configuration.
    ///
    /// # Errors
    /// See [`SigningMethodConfig::validate`].
    pub fn new(
        alg: impl Into<Cow<'static, str>>,
        hash: HashAlgorithm,
        shape: SignatureShape,
        signature_len: usize,
    ) -> JwtResult<Self> {
        let config = Self {
            alg: alg.into(),
            hash,
            shape,
            signature_len,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidConfig`] for malformed JSON or an
    /// inconsistent configuration.
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| JwtError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is self-consistent.
    ///
    /// The hash does not have to be available here; that is checked on every
    /// sign/verify call so a build without it still loads the configuration.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidConfig`] for an empty or non-ASCII `alg`, or a
    /// signature length that disagrees with the shape.
    pub fn validate(&self) -> JwtResult<()> {
        if self.alg.is_empty() || !self.alg.is_ascii() {
            return Err(JwtError::invalid_config(
                "alg must be a non-empty ASCII identifier",
            ));
        }
        if self.signature_len != self.shape.byte_len() {
            return Err(JwtError::invalid_config(format!(
                "{} signatures are {} bytes, configured length is {}",
                self.alg,
                self.shape.byte_len(),
                self.signature_len
            )));
        }
        Ok(())
    }
}

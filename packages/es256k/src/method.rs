//! ES256K / ES256K-R signing methods.
//!
//! Both algorithms are the same adapter: hash the signing input, let the
//! curve primitive sign or verify the digest, and move the signature bytes in
//! and out of an unpadded base64url segment. The variants only differ in
//! their [`SigningMethodConfig`].

use crate::{
    config::SigningMethodConfig,
    error::{JwtError, JwtResult},
    primitive::{CurvePrimitive, K256, SCALAR_LEN},
    segment::{decode_segment, encode_segment},
    traits::SigningMethod,
};
use k256::{
    PublicKey, SecretKey,
    ecdsa::{SigningKey, VerifyingKey},
};
use std::{any::Any, borrow::Cow};
use tracing::{debug, trace, warn};

/// Produces and accepts 256-bit secp256k1 signatures in R || S format.
pub static ES256K: SigningMethodSecp256k1 =
    SigningMethodSecp256k1::new(SigningMethodConfig::es256k());

/// Produces and accepts 264-bit secp256k1 signatures in R || S || V format,
/// V being the recovery byte.
pub static ES256K_R: SigningMethodSecp256k1 =
    SigningMethodSecp256k1::new(SigningMethodConfig::es256k_r());

/// secp256k1 implementation of [`SigningMethod`].
///
/// Private keys must be [`SigningKey`] or [`SecretKey`]; public keys must be
/// [`VerifyingKey`] or [`PublicKey`]. Any other key type is rejected with
/// [`JwtError::WrongKeyFormat`] before any hashing or curve work.
#[derive(Debug, Clone)]
pub struct SigningMethodSecp256k1<P: CurvePrimitive = K256> {
    config: SigningMethodConfig,
    primitive: P,
}

impl SigningMethodSecp256k1<K256> {
    /// Signing method backed by the `k256` primitive.
    ///
    /// The configuration is trusted as-is; use
    /// [`SigningMethodSecp256k1::from_config`] for configuration read at runtime.
    #[must_use]
    pub const fn new(config: SigningMethodConfig) -> Self {
        Self {
            config,
            primitive: K256,
        }
    }

    /// Validate `config` and build a signing method from it.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidConfig`] if the configuration is inconsistent.
    pub fn from_config(config: SigningMethodConfig) -> JwtResult<Self> {
        Self::with_primitive(config, K256)
    }
}

impl<P: CurvePrimitive> SigningMethodSecp256k1<P> {
    /// Validate `config` and build a signing method on a custom primitive.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidConfig`] if the configuration is inconsistent.
    pub fn with_primitive(config: SigningMethodConfig, primitive: P) -> JwtResult<Self> {
        config.validate()?;
        Ok(Self { config, primitive })
    }

    /// Static configuration of this method.
    #[must_use]
    pub fn config(&self) -> &SigningMethodConfig {
        &self.config
    }

    fn ensure_hash(&self) -> JwtResult<()> {
        if self.config.hash.is_available() {
            return Ok(());
        }
        warn!(alg = %self.config.alg, hash = ?self.config.hash, "hash not compiled into this build");
        Err(JwtError::HashUnavailable)
    }

    fn digest(&self, signing_input: &str) -> JwtResult<Vec<u8>> {
        self.config.hash.digest(signing_input.as_bytes())
    }
}

impl<P: CurvePrimitive> SigningMethod for SigningMethodSecp256k1<P> {
    fn sign(&self, signing_input: &str, key: &dyn Any) -> JwtResult<Vec<u8>> {
        let Some(signing_key) = as_signing_key(key) else {
            debug!(alg = %self.config.alg, "sign called without a secp256k1 private key");
            return Err(JwtError::WrongKeyFormat);
        };

        self.ensure_hash()?;
        let digest = self.digest(signing_input)?;

        let raw = self
            .primitive
            .sign_digest(&signing_key, &digest)
            .map_err(|e| {
                debug!(alg = %self.config.alg, error = %e, "curve primitive failed to sign");
                JwtError::SigningFailed
            })?;

        let signature = encode_segment(self.config.shape.apply(raw.as_bytes()));
        trace!(alg = %self.config.alg, len = signature.len(), "signed");
        Ok(signature.into_bytes())
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &dyn Any) -> JwtResult<()> {
        let Some(verifying_key) = as_verifying_key(key) else {
            debug!(alg = %self.config.alg, "verify called without a secp256k1 public key");
            return Err(JwtError::WrongKeyFormat);
        };

        self.ensure_hash()?;

        let sig = decode_segment(signature)?;
        if sig.len() != self.config.signature_len {
            debug!(
                alg = %self.config.alg,
                expected = self.config.signature_len,
                actual = sig.len(),
                "signature length mismatch"
            );
            return Err(JwtError::BadSignature);
        }

        // a trailing recovery byte is not used for verification
        let r = &sig[..SCALAR_LEN];
        let s = &sig[SCALAR_LEN..2 * SCALAR_LEN];

        let digest = self.digest(signing_input)?;
        if !self.primitive.verify_digest(&verifying_key, r, s, &digest) {
            return Err(JwtError::VerificationFailed);
        }

        trace!(alg = %self.config.alg, "signature verified");
        Ok(())
    }

    fn alg(&self) -> &str {
        &self.config.alg
    }
}

fn as_signing_key(key: &dyn Any) -> Option<Cow<'_, SigningKey>> {
    if let Some(signing_key) = key.downcast_ref::<SigningKey>() {
        return Some(Cow::Borrowed(signing_key));
    }
    key.downcast_ref::<SecretKey>()
        .map(|secret_key| Cow::Owned(SigningKey::from(secret_key)))
}

fn as_verifying_key(key: &dyn Any) -> Option<VerifyingKey> {
    if let Some(verifying_key) = key.downcast_ref::<VerifyingKey>() {
        return Some(*verifying_key);
    }
    key.downcast_ref::<PublicKey>().map(VerifyingKey::from)
}

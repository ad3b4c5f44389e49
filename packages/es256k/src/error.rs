//! Error types for the secp256k1 signing methods

use thiserror::Error;

/// Result type for signing method operations
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors surfaced by the ES256K / ES256K-R signing methods.
///
/// Every variant is terminal.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The key handed to `sign`/`verify` is not a secp256k1 key of the expected kind
    #[error("wrong key type")]
    WrongKeyFormat,

    /// The configured hash function is not compiled into this build
    #[error("hasher unavailable")]
    HashUnavailable,

    /// Decoded signature has the wrong length for the method
    #[error("bad signature")]
    BadSignature,

    /// Well-formed signature that does not match the digest and public key
    #[error("signature verification failed")]
    VerificationFailed,

    /// The curve primitive refused to sign
    #[error("failed generating signature")]
    SigningFailed,

    /// Signature segment is not valid unpadded base64url
    #[error("signature segment decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Key bytes could not be parsed as secp256k1 key material
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing method configuration is inconsistent
    #[error("Invalid signing method configuration: {0}")]
    InvalidConfig(String),

    /// No signing method is registered under the requested `alg`
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A signing method is already registered under this `alg`
    #[error("Algorithm already registered: {0}")]
    AlgorithmAlreadyRegistered(String),

    /// Token is not in compact `header.claims.signature` form
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    /// Header or claims (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl JwtError {
    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create an invalid configuration error
    #[inline]
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid token error
    #[inline]
    #[must_use]
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        Self::UnsupportedAlgorithm(alg.to_string())
    }

    /// Whether this is the expected rejection of a mismatched or forged
    /// signature, as opposed to malformed input or a wiring bug.
    #[must_use]
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::VerificationFailed)
    }
}

//! secp256k1 signing methods for JSON Web Tokens
//!
//! Two algorithms are provided:
//! - `ES256K` produces and verifies signatures in R || S format (64 bytes)
//! - `ES256K-R` produces and verifies R || S || V (65 bytes), V being the
//!   recovery byte that lets a verifier recover the signer's public key
//!
//! Both are registered under their `alg` names the first time the registry
//! is used, so tokens can be verified by looking the method up from the
//! header.
//!
//! ```no_run
//! use cryypt_es256k::{ES256K_R, keys, token};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), cryypt_es256k::JwtError> {
//! let signing_key = keys::generate_signing_key()?;
//! let jwt = token::encode(&ES256K_R, None, &json!({"iat": 1_700_000_000}), &signing_key)?;
//!
//! let verified: token::Token<serde_json::Value> =
//!     token::decode(&jwt, signing_key.verifying_key())?;
//! assert_eq!(verified.header.alg, "ES256K-R");
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod hash;
pub mod keys;
mod method;
pub mod primitive;
pub mod registry;
pub mod segment;
pub mod token;
mod traits;

pub use config::{SignatureShape, SigningMethodConfig};
pub use error::*;
pub use hash::HashAlgorithm;
pub use method::{ES256K, ES256K_R, SigningMethodSecp256k1};
pub use registry::{get_signing_method, init, register_signing_method};
pub use segment::{decode_segment, encode_segment};
pub use traits::SigningMethod;

// Key types accepted by the signing methods
pub use k256::{
    PublicKey, SecretKey,
    ecdsa::{SigningKey, VerifyingKey},
};

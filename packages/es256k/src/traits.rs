//! Signing method interface consumed by the token layer.

use crate::error::JwtResult;
use std::any::Any;

/// Pluggable JWT signing method.
///
/// Keys cross this boundary as `&dyn Any` because every registered method
/// expects a different key type; each implementation downcasts and rejects
/// anything it does not understand. Implementations must be thread-safe
/// (Send + Sync).
pub trait SigningMethod: Send + Sync + 'static {
    /// Sign `signing_input` (`base64url(header).base64url(claims)`) and return
    /// the encoded signature segment.
    ///
    /// # Errors
    /// Implementation specific; see the implementing type.
    fn sign(&self, signing_input: &str, key: &dyn Any) -> JwtResult<Vec<u8>>;

    /// Verify an encoded signature segment over `signing_input`.
    ///
    /// # Errors
    /// Implementation specific; see the implementing type.
    fn verify(&self, signing_input: &str, signature: &[u8], key: &dyn Any) -> JwtResult<()>;

    /// Header `alg` value.
    fn alg(&self) -> &str;
}

/// Implementation of `SigningMethod` for `Arc<T>` to allow shared ownership.
impl<T: SigningMethod> SigningMethod for std::sync::Arc<T> {
    fn sign(&self, signing_input: &str, key: &dyn Any) -> JwtResult<Vec<u8>> {
        (**self).sign(signing_input, key)
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &dyn Any) -> JwtResult<()> {
        (**self).verify(signing_input, signature, key)
    }

    fn alg(&self) -> &str {
        (**self).alg()
    }
}

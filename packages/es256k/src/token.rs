//! Compact JWS tokens signed with a registered signing method.
//!
//! Only the `header.claims.signature` envelope is handled here: claims are
//! serialized and deserialized verbatim and no time-based validation runs.

use crate::{
    error::{JwtError, JwtResult},
    registry::get_signing_method,
    segment::{decode_segment, encode_segment},
    traits::SigningMethod,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::any::Any;
use tracing::debug;

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signing algorithm
    pub alg: String,
    /// Token type, always `JWT` for tokens built here
    #[serde(default = "default_typ")]
    pub typ: String,
    /// Key ID hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

fn default_typ() -> String {
    "JWT".to_string()
}

impl JwtHeader {
    /// Header for `alg` with no key ID.
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            alg: alg.to_string(),
            typ: default_typ(),
            kid: None,
        }
    }

    /// Attach a key ID.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }
}

/// A token whose signature has been verified.
#[derive(Debug, Clone)]
pub struct Token<C> {
    /// Decoded header
    pub header: JwtHeader,
    /// Decoded claims
    pub claims: C,
}

/// Sign `claims` with `method` and assemble the compact token.
///
/// # Errors
/// Serialization failures and any error from [`SigningMethod::sign`].
pub fn encode<C: Serialize>(
    method: &dyn SigningMethod,
    kid: Option<&str>,
    claims: &C,
    key: &dyn Any,
) -> JwtResult<String> {
    let mut header = JwtHeader::new(method.alg());
    header.kid = kid.map(str::to_string);

    let header_json =
        serde_json::to_vec(&header).map_err(|e| JwtError::serialization(e.to_string()))?;
    let claims_json =
        serde_json::to_vec(claims).map_err(|e| JwtError::serialization(e.to_string()))?;

    let header_b64 = encode_segment(&header_json);
    let claims_b64 = encode_segment(&claims_json);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + claims_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&claims_b64);

    let signature = method.sign(&signing_input, key)?;
    let signature = String::from_utf8(signature)
        .map_err(|_| JwtError::invalid_token("signature segment is not UTF-8"))?;

    let mut jwt = String::with_capacity(signing_input.len() + 1 + signature.len());
    jwt.push_str(&signing_input);
    jwt.push('.');
    jwt.push_str(&signature);
    Ok(jwt)
}

/// Verify `token` with the method named by its `alg` header, then decode claims.
///
/// # Errors
/// [`JwtError::InvalidToken`] for a malformed envelope or header,
/// [`JwtError::UnsupportedAlgorithm`] if `alg` is not registered, any error
/// from [`SigningMethod::verify`], and [`JwtError::Serialization`] if the
/// verified claims do not deserialize into `C`.
pub fn decode<C: DeserializeOwned>(token: &str, key: &dyn Any) -> JwtResult<Token<C>> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(JwtError::invalid_token("expected three dot-separated segments"));
    };

    let header_json = decode_segment(header_b64)
        .map_err(|_| JwtError::invalid_token("Invalid header encoding"))?;
    let header: JwtHeader = serde_json::from_slice(&header_json)
        .map_err(|_| JwtError::invalid_token("Invalid header JSON"))?;

    let method = get_signing_method(&header.alg).ok_or_else(|| {
        debug!(alg = %header.alg, "token names an unregistered algorithm");
        JwtError::unsupported_algorithm(&header.alg)
    })?;

    // signing input is the first two segments exactly as received
    let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
    method.verify(signing_input, signature_b64.as_bytes(), key)?;

    let claims_json = decode_segment(claims_b64)
        .map_err(|_| JwtError::invalid_token("Invalid payload encoding"))?;
    let claims = serde_json::from_slice(&claims_json)
        .map_err(|e| JwtError::serialization(e.to_string()))?;

    Ok(Token { header, claims })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{ES256K, ES256K_R};
    use k256::ecdsa::SigningKey;
    use serde_json::json;

    fn key() -> SigningKey {
        let mut scalar = [0u8; 32];
        scalar[31] = 7;
        SigningKey::from_slice(&scalar).expect("valid scalar")
    }

    #[test]
    fn header_serialization() {
        let header = JwtHeader::new("ES256K-R").with_key_id("did:ethr:0xabc#owner");
        let json = serde_json::to_value(&header).expect("serializable");
        assert_eq!(
            json,
            json!({"alg": "ES256K-R", "typ": "JWT", "kid": "did:ethr:0xabc#owner"})
        );
    }

    #[test]
    fn encode_decode_both_variants() {
        let key = key();
        let claims = json!({"iat": 12_387_687_632_i64});
        for method in [&ES256K as &dyn SigningMethod, &ES256K_R] {
            let token = encode(method, Some("k1"), &claims, &key).expect("sign");
            let decoded: Token<serde_json::Value> =
                decode(&token, key.verifying_key()).expect("verify");
            assert_eq!(decoded.header.alg, method.alg());
            assert_eq!(decoded.header.kid.as_deref(), Some("k1"));
            assert_eq!(decoded.claims, claims);
        }
    }

    #[test]
    fn rejects_wrong_segment_count() {
        for token in ["", "a.b", "a.b.c.d"] {
            assert!(matches!(
                decode::<serde_json::Value>(token, key().verifying_key()),
                Err(JwtError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn rejects_unregistered_alg() {
        let header = encode_segment(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = encode_segment(b"{}");
        let token = format!("{header}.{claims}.c2ln");
        assert!(matches!(
            decode::<serde_json::Value>(&token, key().verifying_key()),
            Err(JwtError::UnsupportedAlgorithm(alg)) if alg == "HS256"
        ));
    }
}

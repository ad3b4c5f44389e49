//! secp256k1 key generation and parsing

use crate::error::{JwtError, JwtResult};
use k256::{
    ecdsa::{SigningKey, VerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use rand::Rng;
use zeroize::Zeroize;

/// Generate a new secp256k1 signing key from system entropy.
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] in the astronomically unlikely case the
/// random bytes are not a valid scalar (zero or above the curve order).
pub fn generate_signing_key() -> JwtResult<SigningKey> {
    let mut rng = rand::rng();
    let mut private_key_bytes = [0u8; 32];
    rng.fill(&mut private_key_bytes);

    let signing_key = SigningKey::from_slice(&private_key_bytes)
        .map_err(|e| JwtError::InvalidKey(format!("Failed to create signing key: {e}")));
    private_key_bytes.zeroize();
    signing_key
}

/// Parse a private key from a raw 32-byte scalar or a PKCS#8 PEM document.
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if the bytes are neither.
pub fn signing_key_from_bytes(private_key: &[u8]) -> JwtResult<SigningKey> {
    if private_key.starts_with(b"-----BEGIN") {
        let key_str = std::str::from_utf8(private_key)
            .map_err(|_| JwtError::invalid_key("Invalid UTF-8 in private key"))?;
        return SigningKey::from_pkcs8_pem(key_str)
            .map_err(|_| JwtError::invalid_key("Invalid PKCS8 PEM private key"));
    }

    if private_key.len() != 32 {
        return Err(JwtError::invalid_key(
            "Private key must be 32 bytes for secp256k1",
        ));
    }
    SigningKey::from_slice(private_key)
        .map_err(|_| JwtError::invalid_key("Invalid secp256k1 private key bytes"))
}

/// Parse a public key from SEC1 bytes (33 compressed / 65 uncompressed) or
/// an SPKI PEM document.
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if the bytes are neither or the point is
/// not on the curve.
pub fn verifying_key_from_bytes(public_key: &[u8]) -> JwtResult<VerifyingKey> {
    if public_key.starts_with(b"-----BEGIN") {
        let key_str = std::str::from_utf8(public_key)
            .map_err(|_| JwtError::invalid_key("Invalid UTF-8 in public key"))?;
        return VerifyingKey::from_public_key_pem(key_str)
            .map_err(|_| JwtError::invalid_key("Invalid PEM public key"));
    }

    match public_key.len() {
        33 | 65 => VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|_| JwtError::invalid_key("Invalid SEC1 public key bytes")),
        _ => Err(JwtError::invalid_key(
            "Public key must be 33 or 65 bytes for secp256k1",
        )),
    }
}

/// SEC1 encoding of a public key.
#[must_use]
pub fn verifying_key_to_sec1(public_key: &VerifyingKey, compressed: bool) -> Vec<u8> {
    public_key.to_encoded_point(compressed).as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn scalar_one_maps_to_generator() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let signing_key = signing_key_from_bytes(&one).expect("scalar one");
        assert_eq!(
            verifying_key_to_sec1(signing_key.verifying_key(), true),
            hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
    }

    #[test]
    fn generated_keys_round_trip_through_sec1() {
        let signing_key = generate_signing_key().expect("fresh key");
        for compressed in [true, false] {
            let sec1 = verifying_key_to_sec1(signing_key.verifying_key(), compressed);
            assert_eq!(sec1.len(), if compressed { 33 } else { 65 });
            let parsed = verifying_key_from_bytes(&sec1).expect("valid sec1");
            assert_eq!(&parsed, signing_key.verifying_key());
        }
    }

    #[test]
    fn parses_pem_documents() {
        use k256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

        let signing_key = generate_signing_key().expect("fresh key");
        let private_pem = signing_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("encodable private key");
        let public_pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("encodable public key");

        let parsed = signing_key_from_bytes(private_pem.as_bytes()).expect("valid pem");
        assert_eq!(parsed.to_bytes(), signing_key.to_bytes());
        let parsed = verifying_key_from_bytes(public_pem.as_bytes()).expect("valid pem");
        assert_eq!(&parsed, signing_key.verifying_key());
    }

    #[test]
    fn rejects_zero_scalar() {
        assert!(matches!(
            signing_key_from_bytes(&[0u8; 32]),
            Err(JwtError::InvalidKey(_))
        ));
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(signing_key_from_bytes(&[1u8; 31]).is_err());
        assert!(verifying_key_from_bytes(&[2u8; 32]).is_err());
    }

    #[test]
    fn rejects_unknown_sec1_tag() {
        let mut bogus = [0u8; 33];
        // 0x06/0x07 (hybrid form) are not accepted SEC1 tags
        bogus[0] = 0x07;
        bogus[32] = 0x01;
        assert!(matches!(
            verifying_key_from_bytes(&bogus),
            Err(JwtError::InvalidKey(_))
        ));
    }
}

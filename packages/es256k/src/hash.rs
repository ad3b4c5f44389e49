//! Message digests fed to the curve primitive

use crate::error::JwtResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Hash function applied to the JWT signing input before signing/verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum HashAlgorithm {
    /// SHA-256, used by both ES256K variants
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// Legacy Keccak-256 (Ethereum), requires the `keccak` feature
    Keccak256,
}

impl HashAlgorithm {
    /// Whether this build carries an implementation of the hash.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Sha256 | Self::Sha384 | Self::Sha512 => true,
            Self::Keccak256 => cfg!(feature = "keccak"),
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Keccak256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Hash `data` in one shot.
    ///
    /// # Errors
    /// Returns [`JwtError::HashUnavailable`](crate::JwtError::HashUnavailable) if the hash is not compiled in.
    pub fn digest(self, data: &[u8]) -> JwtResult<Vec<u8>> {
        match self {
            Self::Sha256 => Ok(Sha256::digest(data).to_vec()),
            Self::Sha384 => Ok(Sha384::digest(data).to_vec()),
            Self::Sha512 => Ok(Sha512::digest(data).to_vec()),
            Self::Keccak256 => keccak256(data),
        }
    }
}

#[cfg(feature = "keccak")]
fn keccak256(data: &[u8]) -> JwtResult<Vec<u8>> {
    Ok(sha3::Keccak256::digest(data).to_vec())
}

#[cfg(not(feature = "keccak"))]
fn keccak256(_data: &[u8]) -> JwtResult<Vec<u8>> {
    Err(crate::error::JwtError::HashUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JwtError;
    use hex_literal::hex;

    #[test]
    fn sha256_matches_known_vector() {
        let digest = HashAlgorithm::Sha256
            .digest(b"abc")
            .expect("SHA-256 is always available");
        assert_eq!(
            digest,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn output_len_matches_digest() {
        for alg in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            let digest = alg.digest(b"payload").expect("sha2 family is compiled in");
            assert_eq!(digest.len(), alg.output_len());
        }
    }

    #[cfg(not(feature = "keccak"))]
    #[test]
    fn keccak_without_feature_is_unavailable() {
        assert!(!HashAlgorithm::Keccak256.is_available());
        assert!(matches!(
            HashAlgorithm::Keccak256.digest(b"payload"),
            Err(JwtError::HashUnavailable)
        ));
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn keccak_matches_known_vector() {
        let digest = HashAlgorithm::Keccak256
            .digest(b"")
            .expect("keccak feature enabled");
        assert_eq!(
            digest,
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&HashAlgorithm::Sha256).expect("serializable");
        assert_eq!(json, "\"SHA256\"");
        let parsed: HashAlgorithm = serde_json::from_str("\"KECCAK256\"").expect("known name");
        assert_eq!(parsed, HashAlgorithm::Keccak256);
    }
}

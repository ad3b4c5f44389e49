//! JWT segment encoding - base64url with the `=` padding stripped (RFC 7515)

use base64::{Engine as _, engine::general_purpose::URL_SAFE};

/// Encode bytes as an unpadded base64url segment.
#[inline]
#[must_use]
pub fn encode_segment(input: &[u8]) -> String {
    let mut encoded = URL_SAFE.encode(input);
    let trimmed = encoded.trim_end_matches('=').len();
    encoded.truncate(trimmed);
    encoded
}

/// Decode an unpadded base64url segment.
///
/// Padding is restored to a multiple of four before decoding, so segments
/// that arrive with their padding intact decode as well.
///
/// # Errors
/// Returns [`base64::DecodeError`] for characters outside the URL-safe
/// alphabet or an impossible segment length.
pub fn decode_segment(segment: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
    let segment = segment.as_ref();
    let padding = (4 - segment.len() % 4) % 4;

    let mut padded = Vec::with_capacity(segment.len() + padding);
    padded.extend_from_slice(segment);
    padded.resize(segment.len() + padding, b'=');

    URL_SAFE.decode(padded)
}

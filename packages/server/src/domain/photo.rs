//! Photos attached to hazard reports.

use base64::{Engine, engine::general_purpose::STANDARD};

use super::error::BlobError;

/// Decode a base64 photo, accepting an optional `data:...;base64,` prefix.
pub fn decode_base64_photo(encoded: &str) -> Result<Vec<u8>, BlobError> {
    let body = match encoded.split_once(',') {
        Some((_, body)) => body,
        None => encoded,
    };
    STANDARD
        .decode(body.trim())
        .map_err(|e| BlobError::Decode(e.to_string()))
}

//! Envelope codec — the base64-of-JSON wire form of identities.
//!
//! An envelope is standard padded base64 over a compact UTF-8 JSON object.
//! Byte fields inside the object are base64 strings themselves (see
//! [`base64_bytes`]), so key material is base64 inside JSON inside base64.

pub mod base64_bytes;
pub mod document;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{IdentityError, Result};

pub use document::Document;

/// Serialize a record to an envelope.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    let json =
        serde_json::to_vec(value).map_err(|e| IdentityError::Serialization(e.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Parse an envelope into a typed record.
pub fn decode<T: DeserializeOwned>(envelope: &str) -> Result<T> {
    let json = decode_json_bytes(envelope)?;
    serde_json::from_slice(&json).map_err(|e| IdentityError::decode("envelope", e))
}

pub(crate) fn decode_json_bytes(envelope: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(envelope.trim())
        .map_err(|e| IdentityError::decode("envelope", format!("invalid base64: {e}")))
}

//! Serde helpers for fixed-size byte fields stored as base64 strings.
//!
//! # Usage
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(with = "crate::envelope::base64_bytes")]
//!     key: [u8; 32],
//!     #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::envelope::base64_bytes::option")]
//!     other_key: Option<[u8; 32]>,
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    from_base64(&encoded)
}

fn from_base64<E: de::Error, const N: usize>(encoded: &str) -> Result<[u8; N], E> {
    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| E::custom(format_args!("invalid base64: {e}")))?;
    let len = decoded.len();
    decoded
        .try_into()
        .map_err(|_| E::custom(format_args!("expected {N} bytes, got {len}")))
}

/// Same encoding for optional fields; `null` and absent both map to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S, const N: usize>(
        bytes: &Option<[u8; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => super::serialize(bytes, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<Option<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => from_base64(&encoded).map(Some),
            None => Ok(None),
        }
    }
}

//! Ordered JSON documents for partial, forward-compatible transforms.
//!
//! A `Document` keeps every key it was decoded with, in its original
//! order, so a transform that touches one field re-serializes everything
//! else verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IdentityError, Result};

/// An insertion-ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Decode an envelope into a document. The payload must be a JSON object.
    pub fn decode(envelope: &str) -> Result<Self> {
        let json = super::decode_json_bytes(envelope)?;
        match serde_json::from_slice(&json) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(IdentityError::decode("envelope", "expected a JSON object")),
            Err(e) => Err(IdentityError::decode("envelope", e)),
        }
    }

    /// Re-encode the document, keys in their current order.
    pub fn encode(&self) -> Result<String> {
        super::encode(self)
    }

    /// Interpret the whole document as a typed record.
    ///
    /// Keys the record does not know about are ignored.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| IdentityError::decode("envelope", e))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`; `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Set `key`. An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Error types for trustchain identities.
//!
//! All errors are strongly typed and terminal for the call that raised
//! them. Messages name the offending field or value; private key material
//! and user secrets are never included.

/// Identity error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Unable to decode {field}: {reason}")]
    Decode { field: String, reason: String },

    #[error("Wrong size for {field}: expected {expected} bytes, got {actual}")]
    Size {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("App secret and app ID mismatch")]
    Mismatch,

    #[error("Unsupported identity target: {0}")]
    UnsupportedTarget(String),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Key generation failed: {0}")]
    Keygen(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IdentityError {
    pub(crate) fn decode(field: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::InvalidIdentity(format!("missing {field} field"))
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, IdentityError>;

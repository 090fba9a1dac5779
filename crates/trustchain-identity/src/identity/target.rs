//! Identity targets — what kind of subject an identity is bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// The kind of subject an identity's `value` designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A registered user; `value` is the base64 hashed user ID.
    User,
    /// A provisional email; `value` is the literal address.
    Email,
    /// A provisional phone number; `value` is the literal number.
    PhoneNumber,
    /// Public form of `Email`; `value` is an unsalted base64 hash.
    HashedEmail,
    /// Public form of `PhoneNumber`; `value` is a salted base64 hash.
    HashedPhoneNumber,
}

impl Target {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::HashedEmail => "hashed_email",
            Self::HashedPhoneNumber => "hashed_phone_number",
        }
    }

    /// Targets carried by provisional identities before hashing.
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Email | Self::PhoneNumber)
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::HashedEmail | Self::HashedPhoneNumber)
    }

    /// The public, hashed counterpart of a provisional target.
    pub fn hashed(&self) -> Option<Self> {
        match self {
            Self::Email => Some(Self::HashedEmail),
            Self::PhoneNumber => Some(Self::HashedPhoneNumber),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "email" => Ok(Self::Email),
            "phone_number" => Ok(Self::PhoneNumber),
            "hashed_email" => Ok(Self::HashedEmail),
            "hashed_phone_number" => Ok(Self::HashedPhoneNumber),
            other => Err(IdentityError::UnsupportedTarget(other.to_string())),
        }
    }
}

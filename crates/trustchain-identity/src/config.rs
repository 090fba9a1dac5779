//! Tenant configuration.
//!
//! A tenant (application) is identified by a public app ID and controls a
//! matching app secret. Both arrive as base64 strings and are validated
//! into raw [`AppCredentials`] before any identity is built.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::hashing::{derive_app_id, APP_ID_SIZE};
use crate::crypto::keys::{SigningKeyPair, SIGNATURE_PRIVATE_KEY_SIZE};
use crate::error::{IdentityError, Result};
use crate::identity::Target;

/// Size of a decoded app secret (`seed ‖ public`).
pub const APP_SECRET_SIZE: usize = SIGNATURE_PRIVATE_KEY_SIZE;

/// Which provisional targets a deployment accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionalTargets {
    /// Emails only.
    EmailOnly,
    /// Emails and phone numbers.
    #[default]
    EmailAndPhoneNumber,
}

impl ProvisionalTargets {
    /// Whether provisional identities may be issued for `target`.
    pub fn accepts(self, target: Target) -> bool {
        match self {
            Self::EmailOnly => target == Target::Email,
            Self::EmailAndPhoneNumber => matches!(target, Target::Email | Target::PhoneNumber),
        }
    }
}

/// Tenant configuration as supplied by the caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base64 app ID.
    pub app_id: String,
    /// Base64 app secret.
    pub app_secret: String,
    /// Accepted provisional targets.
    #[serde(default)]
    pub provisional_targets: ProvisionalTargets,
}

impl Config {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            provisional_targets: ProvisionalTargets::default(),
        }
    }

    pub fn with_provisional_targets(mut self, targets: ProvisionalTargets) -> Self {
        self.provisional_targets = targets;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| IdentityError::decode("config", e))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Decode both credentials and check their sizes.
    ///
    /// The app ID is checked completely before the app secret. Whether the
    /// two belong together is only checked when a user identity is built.
    pub fn validate(&self) -> Result<AppCredentials> {
        let app_id = decode_sized::<APP_ID_SIZE>("app_id", &self.app_id)?;
        let app_secret = decode_sized::<APP_SECRET_SIZE>("app_secret", &self.app_secret)?;
        Ok(AppCredentials { app_id, app_secret })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("provisional_targets", &self.provisional_targets)
            .finish()
    }
}

fn decode_sized<const N: usize>(field: &'static str, encoded: &str) -> Result<[u8; N]> {
    // The input may be the tenant secret; only the field and the codec error are reported.
    let mut decoded = STANDARD
        .decode(encoded)
        .map_err(|e| IdentityError::decode(field, format!("invalid base64: {e}")))?;
    if decoded.len() != N {
        let actual = decoded.len();
        decoded.zeroize();
        return Err(IdentityError::Size {
            field,
            expected: N,
            actual,
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&decoded);
    decoded.zeroize();
    Ok(out)
}

/// Validated, raw tenant credentials. The secret is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AppCredentials {
    app_id: [u8; APP_ID_SIZE],
    app_secret: [u8; APP_SECRET_SIZE],
}

impl AppCredentials {
    pub fn from_bytes(app_id: [u8; APP_ID_SIZE], app_secret: [u8; APP_SECRET_SIZE]) -> Self {
        Self { app_id, app_secret }
    }

    /// Create a brand-new tenant: a fresh Ed25519 key pair and its app ID.
    pub fn generate() -> Result<Self> {
        let key_pair = SigningKeyPair::generate()?;
        let app_secret = key_pair.private_key_bytes();
        Ok(Self {
            app_id: derive_app_id(&app_secret),
            app_secret,
        })
    }

    pub fn app_id(&self) -> &[u8; APP_ID_SIZE] {
        &self.app_id
    }

    pub fn app_secret(&self) -> &[u8; APP_SECRET_SIZE] {
        &self.app_secret
    }

    /// Tenant public signature key, embedded in the second half of the secret.
    pub fn public_signature_key(&self) -> [u8; 32] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&self.app_secret[32..]);
        key
    }

    pub fn app_id_base64(&self) -> String {
        STANDARD.encode(self.app_id)
    }

    /// Render as a base64 [`Config`] with the default target policy.
    pub fn to_config(&self) -> Config {
        Config::new(self.app_id_base64(), STANDARD.encode(self.app_secret))
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id_base64())
            .finish_non_exhaustive()
    }
}

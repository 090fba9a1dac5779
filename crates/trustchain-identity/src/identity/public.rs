//! Public identities — the part of an identity safe to hand to a third party.
//!
//! A user identity's public form is its base record unchanged: the value is
//! already a hash. A provisional identity's public form keeps its public
//! keys but hashes its value, so an email or phone number is never served
//! in clear. Emails use an unsalted hash so the trust service can still
//! match them; other targets are salted with the identity's own private
//! signature key, which only the issuer of the private form ever had.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::hashing::{hash_email, hash_provisional_value, APP_ID_SIZE};
use crate::crypto::keys::{
    ENCRYPTION_PUBLIC_KEY_SIZE, SIGNATURE_PRIVATE_KEY_SIZE, SIGNATURE_PUBLIC_KEY_SIZE,
};
use crate::envelope::{self, base64_bytes, Document};
use crate::error::{IdentityError, Result};
use crate::identity::Target;

/// Fields shared by every identity shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    /// App ID of the issuing tenant.
    #[serde(with = "base64_bytes")]
    pub trustchain_id: [u8; APP_ID_SIZE],
    pub target: Target,
    pub value: String,
}

impl PublicIdentity {
    pub fn to_envelope(&self) -> Result<String> {
        envelope::encode(self)
    }

    pub fn from_envelope(envelope: &str) -> Result<Self> {
        envelope::decode(envelope)
    }
}

/// Public view of either a user or a provisional identity.
///
/// Provisional keys are present only for provisional identities and are
/// omitted from the wire form otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyPublicIdentity {
    #[serde(flatten)]
    pub public: PublicIdentity,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes::option"
    )]
    pub public_signature_key: Option<[u8; SIGNATURE_PUBLIC_KEY_SIZE]>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes::option"
    )]
    pub public_encryption_key: Option<[u8; ENCRYPTION_PUBLIC_KEY_SIZE]>,
}

impl AnyPublicIdentity {
    pub fn to_envelope(&self) -> Result<String> {
        envelope::encode(self)
    }

    pub fn from_envelope(envelope: &str) -> Result<Self> {
        envelope::decode(envelope)
    }
}

/// Read and parse the `target` field of a decoded identity.
pub(crate) fn document_target(document: &Document) -> Result<Target> {
    match document.get("target") {
        None => Err(IdentityError::missing_field("target")),
        Some(Value::String(target)) => target.parse(),
        Some(other) => Err(IdentityError::UnsupportedTarget(other.to_string())),
    }
}

/// Hash a provisional value into its public form.
///
/// `private_signature_key` is only consulted for non-email targets.
pub(crate) fn hash_provisional(
    target: Target,
    value: &str,
    private_signature_key: Option<&[u8]>,
) -> Result<(Target, String)> {
    let hashed_target = target
        .hashed()
        .ok_or_else(|| IdentityError::UnsupportedTarget(target.to_string()))?;
    let hashed_value = match target {
        Target::Email => hash_email(value),
        _ => {
            let key = private_signature_key
                .ok_or_else(|| IdentityError::missing_field("private_signature_key"))?;
            hash_provisional_value(value, key)
        }
    };
    Ok((hashed_target, hashed_value))
}

fn private_signature_key(document: &Document) -> Result<[u8; SIGNATURE_PRIVATE_KEY_SIZE]> {
    let encoded = document
        .get_str("private_signature_key")
        .ok_or_else(|| IdentityError::missing_field("private_signature_key"))?;
    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| IdentityError::decode("private_signature_key", e))?;
    let actual = decoded.len();
    decoded.try_into().map_err(|_| IdentityError::Size {
        field: "private_signature_key",
        expected: SIGNATURE_PRIVATE_KEY_SIZE,
        actual,
    })
}

/// Derive the public envelope of a user or provisional identity envelope.
///
/// Only fresh identities are accepted: a target that is already hashed,
/// or unknown, is rejected. Non-email provisional targets need the
/// private envelope as input, since their hash is salted with the
/// private signature key.
pub fn derive_public(envelope: &str) -> Result<String> {
    let document = Document::decode(envelope)?;
    let target = document_target(&document)?;
    if target != Target::User && !target.is_provisional() {
        warn!("refusing to derive a public identity from target {target}");
        return Err(IdentityError::UnsupportedTarget(target.to_string()));
    }

    let mut public: AnyPublicIdentity = document.to_record()?;
    if target.is_provisional() {
        let key = match target {
            Target::Email => None,
            _ => Some(private_signature_key(&document)?),
        };
        let (hashed_target, hashed_value) =
            hash_provisional(target, &public.public.value, key.as_ref().map(|k| &k[..]))?;
        public.public.target = hashed_target;
        public.public.value = hashed_value;
    }

    debug!(
        "derived public {} identity for app {}",
        public.public.target,
        STANDARD.encode(public.public.trustchain_id)
    );
    public.to_envelope()
}

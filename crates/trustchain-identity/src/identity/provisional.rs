//! Provisional identities — tokens for subjects not yet registered.
//!
//! A provisional identity binds an email or phone number to a fresh
//! signature key pair and a fresh encryption key pair. It is not signed by
//! the tenant: it is claimed later by a separate verification flow.

use std::fmt;

use log::{debug, warn};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::config::{AppCredentials, ProvisionalTargets};
use crate::crypto::hashing::APP_ID_SIZE;
use crate::crypto::keys::{
    EncryptionKeyPair, SigningKeyPair, ENCRYPTION_PRIVATE_KEY_SIZE, ENCRYPTION_PUBLIC_KEY_SIZE,
    SIGNATURE_PRIVATE_KEY_SIZE, SIGNATURE_PUBLIC_KEY_SIZE,
};
use crate::envelope::{self, base64_bytes};
use crate::error::{IdentityError, Result};
use crate::identity::public::hash_provisional;
use crate::identity::{AnyPublicIdentity, PublicIdentity, Target};

/// The public keys of a provisional identity, alongside its base record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProvisionalIdentity {
    #[serde(flatten)]
    pub public: PublicIdentity,
    #[serde(with = "base64_bytes")]
    pub public_signature_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    #[serde(with = "base64_bytes")]
    pub public_encryption_key: [u8; ENCRYPTION_PUBLIC_KEY_SIZE],
}

impl PublicProvisionalIdentity {
    pub fn to_envelope(&self) -> Result<String> {
        envelope::encode(self)
    }

    pub fn from_envelope(envelope: &str) -> Result<Self> {
        envelope::decode(envelope)
    }
}

/// A full, private provisional identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalIdentity {
    #[serde(flatten)]
    public: PublicProvisionalIdentity,
    #[serde(with = "base64_bytes")]
    private_signature_key: [u8; SIGNATURE_PRIVATE_KEY_SIZE],
    #[serde(with = "base64_bytes")]
    private_encryption_key: [u8; ENCRYPTION_PRIVATE_KEY_SIZE],
}

impl ProvisionalIdentity {
    pub fn public_provisional(&self) -> &PublicProvisionalIdentity {
        &self.public
    }

    pub fn target(&self) -> Target {
        self.public.public.target
    }

    /// The email or phone number, in clear.
    pub fn value(&self) -> &str {
        &self.public.public.value
    }

    pub fn trustchain_id(&self) -> &[u8; APP_ID_SIZE] {
        &self.public.public.trustchain_id
    }

    pub fn public_signature_key(&self) -> &[u8; SIGNATURE_PUBLIC_KEY_SIZE] {
        &self.public.public_signature_key
    }

    pub fn public_encryption_key(&self) -> &[u8; ENCRYPTION_PUBLIC_KEY_SIZE] {
        &self.public.public_encryption_key
    }

    pub fn private_signature_key(&self) -> &[u8; SIGNATURE_PRIVATE_KEY_SIZE] {
        &self.private_signature_key
    }

    pub fn private_encryption_key(&self) -> &[u8; ENCRYPTION_PRIVATE_KEY_SIZE] {
        &self.private_encryption_key
    }

    /// The shareable form: public keys kept, value hashed.
    pub fn to_public(&self) -> Result<AnyPublicIdentity> {
        let (target, value) = hash_provisional(
            self.target(),
            self.value(),
            Some(&self.private_signature_key[..]),
        )?;
        Ok(AnyPublicIdentity {
            public: PublicIdentity {
                trustchain_id: self.public.public.trustchain_id,
                target,
                value,
            },
            public_signature_key: Some(self.public.public_signature_key),
            public_encryption_key: Some(self.public.public_encryption_key),
        })
    }

    pub fn to_envelope(&self) -> Result<String> {
        envelope::encode(self)
    }

    /// Parse a private provisional identity envelope.
    pub fn from_envelope(envelope: &str) -> Result<Self> {
        let identity: Self = envelope::decode(envelope)?;
        if !identity.target().is_provisional() {
            return Err(IdentityError::InvalidIdentity(format!(
                "expected a provisional identity, got target {}",
                identity.target()
            )));
        }
        Ok(identity)
    }
}

impl Drop for ProvisionalIdentity {
    fn drop(&mut self) {
        self.private_signature_key.zeroize();
        self.private_encryption_key.zeroize();
    }
}

impl fmt::Debug for ProvisionalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionalIdentity")
            .field("target", &self.target())
            .field("public_signature_key", &self.public.public_signature_key)
            .field("public_encryption_key", &self.public.public_encryption_key)
            .finish_non_exhaustive()
    }
}

/// Build a provisional identity from the operating system RNG.
pub fn build_provisional_identity(
    credentials: &AppCredentials,
    target: Target,
    value: &str,
    accepted: ProvisionalTargets,
) -> Result<ProvisionalIdentity> {
    build_provisional_identity_with(credentials, target, value, accepted, &mut OsRng)
}

/// Build a provisional identity, drawing both key pairs from `rng`.
pub fn build_provisional_identity_with<R: RngCore + CryptoRng>(
    credentials: &AppCredentials,
    target: Target,
    value: &str,
    accepted: ProvisionalTargets,
    rng: &mut R,
) -> Result<ProvisionalIdentity> {
    if !accepted.accepts(target) {
        warn!("rejected provisional identity target {target}");
        return Err(IdentityError::UnsupportedTarget(target.to_string()));
    }

    let signature = SigningKeyPair::generate_with(rng)?;
    let encryption = EncryptionKeyPair::generate_with(rng)?;

    debug!(
        "issued provisional {target} identity for app {}",
        credentials.app_id_base64()
    );
    Ok(ProvisionalIdentity {
        public: PublicProvisionalIdentity {
            public: PublicIdentity {
                trustchain_id: *credentials.app_id(),
                target,
                value: value.to_string(),
            },
            public_signature_key: signature.public_key_bytes(),
            public_encryption_key: encryption.public_key_bytes(),
        },
        private_signature_key: signature.private_key_bytes(),
        private_encryption_key: encryption.private_key_bytes(),
    })
}

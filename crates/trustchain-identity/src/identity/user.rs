//! User identities — tokens for registered users of a tenant.
//!
//! A user identity carries a fresh ephemeral Ed25519 key pair, a delegation
//! signature by the tenant secret over `ephemeral_public ‖ user_id`, and a
//! user secret the client uses to protect local data.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::config::AppCredentials;
use crate::crypto::hashing::{
    check_user_secret, derive_app_id, derive_user_secret, hash_user_id, APP_ID_SIZE,
    USER_ID_SIZE, USER_SECRET_SIZE,
};
use crate::crypto::keys::{SigningKeyPair, SIGNATURE_PRIVATE_KEY_SIZE, SIGNATURE_PUBLIC_KEY_SIZE};
use crate::crypto::signing::{self, delegation_payload, SIGNATURE_SIZE};
use crate::envelope::{self, base64_bytes};
use crate::error::{IdentityError, Result};
use crate::identity::{PublicIdentity, Target};

/// A full, private user identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(flatten)]
    public: PublicIdentity,
    #[serde(with = "base64_bytes")]
    delegation_signature: [u8; SIGNATURE_SIZE],
    #[serde(with = "base64_bytes")]
    ephemeral_public_signature_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    #[serde(with = "base64_bytes")]
    ephemeral_private_signature_key: [u8; SIGNATURE_PRIVATE_KEY_SIZE],
    #[serde(with = "base64_bytes")]
    user_secret: [u8; USER_SECRET_SIZE],
}

impl Identity {
    /// The shareable base record. Safe as-is: the value is a hash.
    pub fn public(&self) -> &PublicIdentity {
        &self.public
    }

    pub fn trustchain_id(&self) -> &[u8; APP_ID_SIZE] {
        &self.public.trustchain_id
    }

    /// Base64 hashed user ID.
    pub fn value(&self) -> &str {
        &self.public.value
    }

    /// The raw hashed user ID carried in `value`.
    pub fn user_id(&self) -> Result<[u8; USER_ID_SIZE]> {
        let decoded = STANDARD
            .decode(&self.public.value)
            .map_err(|e| IdentityError::decode("value", e))?;
        let actual = decoded.len();
        decoded.try_into().map_err(|_| IdentityError::Size {
            field: "value",
            expected: USER_ID_SIZE,
            actual,
        })
    }

    pub fn delegation_signature(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.delegation_signature
    }

    pub fn ephemeral_public_signature_key(&self) -> &[u8; SIGNATURE_PUBLIC_KEY_SIZE] {
        &self.ephemeral_public_signature_key
    }

    pub fn ephemeral_private_signature_key(&self) -> &[u8; SIGNATURE_PRIVATE_KEY_SIZE] {
        &self.ephemeral_private_signature_key
    }

    pub fn user_secret(&self) -> &[u8; USER_SECRET_SIZE] {
        &self.user_secret
    }

    /// Check the delegation signature against the tenant's public signature key,
    /// and the user secret's check byte against the user ID.
    pub fn verify_delegation(&self, tenant_public_signature_key: &[u8; 32]) -> Result<()> {
        let user_id = self.user_id()?;
        let payload = delegation_payload(&self.ephemeral_public_signature_key, &user_id);
        signing::verify(
            tenant_public_signature_key,
            &payload,
            &self.delegation_signature,
        )?;
        check_user_secret(&user_id, &self.user_secret)
    }

    pub fn to_envelope(&self) -> Result<String> {
        envelope::encode(self)
    }

    /// Parse a private user identity envelope.
    pub fn from_envelope(envelope: &str) -> Result<Self> {
        let identity: Self = envelope::decode(envelope)?;
        if identity.public.target != Target::User {
            return Err(IdentityError::InvalidIdentity(format!(
                "expected a user identity, got target {}",
                identity.public.target
            )));
        }
        Ok(identity)
    }
}

impl Drop for Identity {
    fn drop(&mut self) {
        self.ephemeral_private_signature_key.zeroize();
        self.user_secret.zeroize();
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("public", &self.public)
            .field(
                "ephemeral_public_signature_key",
                &STANDARD.encode(self.ephemeral_public_signature_key),
            )
            .finish_non_exhaustive()
    }
}

/// Build a user identity from the operating system RNG.
pub fn build_identity(credentials: &AppCredentials, user_id: &str) -> Result<Identity> {
    build_identity_with(credentials, user_id, &mut OsRng)
}

/// Build a user identity, drawing the ephemeral key from `rng`.
pub fn build_identity_with<R: RngCore + CryptoRng>(
    credentials: &AppCredentials,
    user_id: &str,
    rng: &mut R,
) -> Result<Identity> {
    let app_id = credentials.app_id();
    if derive_app_id(credentials.app_secret()) != *app_id {
        warn!(
            "app secret does not match app ID {}",
            credentials.app_id_base64()
        );
        return Err(IdentityError::Mismatch);
    }

    let hashed_user_id = hash_user_id(app_id, user_id);
    let user_secret = derive_user_secret(&hashed_user_id);

    let ephemeral = SigningKeyPair::generate_with(rng)?;
    let ephemeral_public_signature_key = ephemeral.public_key_bytes();

    let tenant = SigningKeyPair::from_keypair_bytes(credentials.app_secret())?;
    let delegation_signature = tenant.sign(&delegation_payload(
        &ephemeral_public_signature_key,
        &hashed_user_id,
    ));

    debug!("issued user identity for app {}", credentials.app_id_base64());
    Ok(Identity {
        public: PublicIdentity {
            trustchain_id: *app_id,
            target: Target::User,
            value: STANDARD.encode(hashed_user_id),
        },
        delegation_signature,
        ephemeral_public_signature_key,
        ephemeral_private_signature_key: ephemeral.private_key_bytes(),
        user_secret,
    })
}

//! Ed25519 and X25519 key pair generation.
//!
//! Ed25519 is used for the tenant secret, ephemeral delegation keys and
//! provisional signature keys. X25519 is used for provisional encryption
//! keys. Private Ed25519 keys travel in the 64-byte `seed ‖ public` form.

use ed25519_dalek::{SigningKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroize;

use crate::crypto::random::random_bytes;
use crate::error::{IdentityError, Result};

/// Size of an Ed25519 public key.
pub const SIGNATURE_PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_LENGTH;
/// Size of an Ed25519 private key in `seed ‖ public` form.
pub const SIGNATURE_PRIVATE_KEY_SIZE: usize = KEYPAIR_LENGTH;
/// Size of an X25519 public key.
pub const ENCRYPTION_PUBLIC_KEY_SIZE: usize = 32;
/// Size of an X25519 private key.
pub const ENCRYPTION_PRIVATE_KEY_SIZE: usize = 32;

/// An Ed25519 key pair for signing operations.
///
/// `SigningKey` zeroizes itself on drop.
pub struct SigningKeyPair {
    signing_key: SigningKey,
}

impl SigningKeyPair {
    /// Generate a new key pair from the operating system RNG.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new key pair from the given RNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut seed: [u8; SECRET_KEY_LENGTH] = random_bytes(rng)?;
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { signing_key })
    }

    /// Reconstruct a key pair from its 64-byte `seed ‖ public` form.
    ///
    /// Fails if the embedded public key does not belong to the seed.
    pub fn from_keypair_bytes(bytes: &[u8; SIGNATURE_PRIVATE_KEY_SIZE]) -> Result<Self> {
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| IdentityError::InvalidKey(format!("invalid ed25519 key pair: {e}")))?;
        Ok(Self { signing_key })
    }

    /// Return a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Return the public key bytes.
    pub fn public_key_bytes(&self) -> [u8; SIGNATURE_PUBLIC_KEY_SIZE] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Return the private key as `seed ‖ public`. Caller must zeroize after use.
    pub fn private_key_bytes(&self) -> [u8; SIGNATURE_PRIVATE_KEY_SIZE] {
        self.signing_key.to_keypair_bytes()
    }

    /// Sign a message, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        crate::crypto::signing::sign(&self.signing_key, message).to_bytes()
    }
}

/// An X25519 static key pair for provisional encryption keys.
pub struct EncryptionKeyPair {
    secret: StaticSecret,
    public: X25519PublicKey,
}

impl EncryptionKeyPair {
    /// Generate a new key pair from the operating system RNG.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new key pair from the given RNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut bytes: [u8; ENCRYPTION_PRIVATE_KEY_SIZE] = random_bytes(rng)?;
        let secret = StaticSecret::from(bytes);
        bytes.zeroize();
        let public = X25519PublicKey::from(&secret);
        Ok(Self { secret, public })
    }

    /// Return the public key bytes.
    pub fn public_key_bytes(&self) -> [u8; ENCRYPTION_PUBLIC_KEY_SIZE] {
        *self.public.as_bytes()
    }

    /// Return the private key bytes. Caller must zeroize after use.
    pub fn private_key_bytes(&self) -> [u8; ENCRYPTION_PRIVATE_KEY_SIZE] {
        self.secret.to_bytes()
    }
}

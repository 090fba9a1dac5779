//! Ed25519 signing and verification.
//!
//! Delegation signatures are plain Ed25519 over `ephemeral_public ‖ user_id`.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{IdentityError, Result};

/// Size of an Ed25519 signature.
pub const SIGNATURE_SIZE: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Sign a message with an Ed25519 signing key.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
    signing_key.sign(message)
}

/// Verify a raw Ed25519 signature against raw public key bytes.
pub fn verify(
    public_key: &[u8; 32],
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> Result<()> {
    let verifying_key = VerifyingKey::from_bytes(public_key)
        .map_err(|e| IdentityError::InvalidKey(format!("invalid verifying key: {e}")))?;
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .map_err(|_| IdentityError::InvalidKey("signature verification failed".into()))
}

/// Build the message a tenant signs to delegate an ephemeral key to a user.
pub fn delegation_payload(ephemeral_public_key: &[u8], user_id: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(ephemeral_public_key.len() + user_id.len());
    payload.extend_from_slice(ephemeral_public_key);
    payload.extend_from_slice(user_id);
    payload
}

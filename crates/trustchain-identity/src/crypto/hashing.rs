//! BLAKE2b generic hashing and the identity derivations built on it.
//!
//! Every derivation here is part of the wire contract: app IDs, user IDs,
//! user secrets and hashed provisional values must be bit-exact with
//! tokens already issued by other implementations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use blake2::digest::consts::{U16, U32};
use blake2::{Blake2b, Digest};

use crate::error::{IdentityError, Result};

type Blake2b256 = Blake2b<U32>;
type Blake2b128 = Blake2b<U16>;

/// Size of a generic hash digest.
pub const HASH_SIZE: usize = 32;

/// Size of an app ID.
pub const APP_ID_SIZE: usize = HASH_SIZE;

/// Size of a hashed user ID.
pub const USER_ID_SIZE: usize = HASH_SIZE;

/// Size of a user secret, including its trailing check byte.
pub const USER_SECRET_SIZE: usize = 32;

/// Block nature prefixed to the tenant public key when deriving an app ID.
const APP_CREATION_NATURE: u8 = 1;

/// BLAKE2b-256 over the concatenation of `parts`.
pub fn generic_hash(parts: &[&[u8]]) -> [u8; HASH_SIZE] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn generic_hash_16(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = Blake2b128::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 16];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Derive the public app ID from a tenant secret in `seed ‖ public` form.
pub fn derive_app_id(app_secret: &[u8; 64]) -> [u8; APP_ID_SIZE] {
    generic_hash(&[&[APP_CREATION_NATURE][..], &app_secret[32..]])
}

/// Hash a caller-chosen user identifier under a tenant.
///
/// The app ID salts the identifier so the same name under two tenants
/// yields unrelated user IDs.
pub fn hash_user_id(app_id: &[u8; APP_ID_SIZE], user_id: &str) -> [u8; USER_ID_SIZE] {
    generic_hash(&[user_id.as_bytes(), &app_id[..]])
}

fn user_secret_check_byte(prefix: &[u8], user_id: &[u8; USER_ID_SIZE]) -> u8 {
    generic_hash_16(&[prefix, &user_id[..]])[0]
}

/// Derive the local user secret for a hashed user ID.
///
/// Layout: 31 derived bytes followed by one check byte binding them to
/// the user ID.
pub fn derive_user_secret(user_id: &[u8; USER_ID_SIZE]) -> [u8; USER_SECRET_SIZE] {
    let digest = generic_hash(&[&user_id[..]]);
    let mut secret = [0u8; USER_SECRET_SIZE];
    secret[..USER_SECRET_SIZE - 1].copy_from_slice(&digest[..USER_SECRET_SIZE - 1]);
    secret[USER_SECRET_SIZE - 1] =
        user_secret_check_byte(&secret[..USER_SECRET_SIZE - 1], user_id);
    secret
}

/// Check that a user secret belongs to a user ID and was not corrupted.
pub fn check_user_secret(user_id: &[u8; USER_ID_SIZE], user_secret: &[u8]) -> Result<()> {
    if user_secret.len() != USER_SECRET_SIZE {
        return Err(IdentityError::Size {
            field: "user_secret",
            expected: USER_SECRET_SIZE,
            actual: user_secret.len(),
        });
    }
    let (prefix, check) = user_secret.split_at(USER_SECRET_SIZE - 1);
    if user_secret_check_byte(prefix, user_id) != check[0] {
        return Err(IdentityError::InvalidIdentity(
            "user secret does not match user ID".into(),
        ));
    }
    Ok(())
}

/// Unsalted hash of a provisional email, base64-encoded.
pub fn hash_email(email: &str) -> String {
    STANDARD.encode(generic_hash(&[email.as_bytes()]))
}

/// Hash of a provisional value salted by its identity's private signature key.
pub fn hash_provisional_value(value: &str, private_signature_key: &[u8]) -> String {
    let salt = generic_hash(&[private_signature_key]);
    STANDARD.encode(generic_hash(&[&salt[..], value.as_bytes()]))
}

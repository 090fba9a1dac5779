//! Cryptographic primitives for trustchain identities.
//!
//! This module provides:
//! - Ed25519 signing key pairs (tenant, ephemeral and provisional keys)
//! - X25519 encryption key pairs (provisional identities)
//! - BLAKE2b generic hashing and the identity derivations built on it
//! - Fallible, cryptographically secure random number generation

pub mod hashing;
pub mod keys;
pub mod random;
pub mod signing;

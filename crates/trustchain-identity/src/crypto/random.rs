//! Secure random number generation.
//!
//! Key generation draws from the operating system's random source by
//! default. Filling is fallible so a broken source surfaces as
//! `IdentityError::Keygen` instead of a panic.

use rand_core::{CryptoRng, RngCore};

use crate::error::{IdentityError, Result};

/// Fill a buffer from a cryptographically secure RNG.
pub fn fill_random<R: RngCore + CryptoRng>(rng: &mut R, buf: &mut [u8]) -> Result<()> {
    rng.try_fill_bytes(buf)
        .map_err(|e| IdentityError::Keygen(format!("random source failure: {e}")))
}

/// Generate a fixed-size array of random bytes from the given RNG.
pub fn random_bytes<R: RngCore + CryptoRng, const N: usize>(rng: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    fill_random(rng, &mut buf)?;
    Ok(buf)
}

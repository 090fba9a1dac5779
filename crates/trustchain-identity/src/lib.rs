//! Trustchain identities — client-side issuance of signed, portable tokens.
//!
//! An identity binds a user, or a not-yet-registered email or phone
//! number, to a tenant application without a server round-trip. This
//! crate builds those tokens, derives their public form, and upgrades
//! legacy public identities. It never stores, transports or verifies
//! them server-side.
//!
//! ```no_run
//! use trustchain_identity::{create_identity, get_public_identity, AppCredentials};
//!
//! let config = AppCredentials::generate()?.to_config();
//! let identity = create_identity(&config, "alice")?;
//! let public = get_public_identity(&identity)?;
//! # Ok::<(), trustchain_identity::IdentityError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod identity;

pub use config::{AppCredentials, Config, ProvisionalTargets};
pub use envelope::Document;
pub use error::{IdentityError, Result};
pub use identity::{
    AnyPublicIdentity, Identity, ProvisionalIdentity, PublicIdentity, PublicProvisionalIdentity,
    Target,
};

/// Create a private user identity envelope for `user_id` under the tenant.
pub fn create_identity(config: &Config, user_id: &str) -> Result<String> {
    let credentials = config.validate()?;
    identity::build_identity(&credentials, user_id)?.to_envelope()
}

/// Create a private provisional identity envelope for an email or phone number.
///
/// `target` is checked against the configuration's accepted provisional
/// targets.
pub fn create_provisional_identity(config: &Config, target: &str, value: &str) -> Result<String> {
    let credentials = config.validate()?;
    let target: Target = target.parse()?;
    identity::build_provisional_identity(
        &credentials,
        target,
        value,
        config.provisional_targets,
    )?
    .to_envelope()
}

/// Derive the envelope that may be shared with third parties.
pub fn get_public_identity(envelope: &str) -> Result<String> {
    identity::derive_public(envelope)
}

/// Hash the value of a legacy public email identity; idempotent.
pub fn upgrade_identity(envelope: &str) -> Result<String> {
    identity::upgrade(envelope)
}

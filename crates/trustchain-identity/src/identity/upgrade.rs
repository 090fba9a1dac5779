//! Upgrade of public provisional email identities issued before emails
//! were hashed.
//!
//! The transform works on the raw document so fields this version does
//! not know about survive unchanged, in their original order.

use log::debug;

use crate::crypto::hashing::hash_email;
use crate::envelope::Document;
use crate::error::{IdentityError, Result};
use crate::identity::Target;

/// Hash the value of a public email identity in place. Any other document
/// is re-encoded untouched, so the transform is idempotent.
pub fn upgrade(envelope: &str) -> Result<String> {
    let mut document = Document::decode(envelope)?;

    let is_private = document.contains("private_encryption_key");
    let is_email = document
        .get("target")
        .ok_or_else(|| IdentityError::missing_field("target"))?
        .as_str()
        == Some(Target::Email.as_str());

    if is_email && !is_private {
        let hashed = hash_email(
            document
                .get_str("value")
                .ok_or_else(|| IdentityError::missing_field("value"))?,
        );
        document.set("target", Target::HashedEmail.as_str());
        document.set("value", hashed);
        debug!("upgraded public email identity to hashed_email");
    }

    document.encode()
}

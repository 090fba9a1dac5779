//! Identity protocol — construction, public derivation and upgrade.
//!
//! User identities are built in [`user`], provisional ones in
//! [`provisional`]. [`public`] derives the shareable form of either and
//! [`upgrade`] hashes legacy public email identities.

pub mod provisional;
pub mod public;
pub mod target;
pub mod upgrade;
pub mod user;

pub use provisional::{
    build_provisional_identity, build_provisional_identity_with, ProvisionalIdentity,
    PublicProvisionalIdentity,
};
pub use public::{derive_public, AnyPublicIdentity, PublicIdentity};
pub use target::Target;
pub use upgrade::upgrade;
pub use user::{build_identity, build_identity_with, Identity};

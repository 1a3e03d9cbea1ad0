//! Concrete authentication sources.
//!
//! Only the internal (database credential) source ships today; LDAP and
//! OAuth slots exist in the registry constants and arrive as further
//! modules here.

mod internal;

pub use internal::{InternalAuth, hash_password};

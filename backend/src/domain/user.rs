//! User data model.
//!
//! The user store owns these records; authentication sources only read them.
//! The password hash never leaves the domain layer.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned by [`Username::new`] and [`User`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username contained leading or trailing whitespace.
    UntrimmedUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UntrimmedUsername => {
                write!(f, "username must not have surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login identifier for a stored account; an email address for accounts
/// served by the internal source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if value.trim() != value {
            return Err(UserValidationError::UntrimmedUsername);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Stored account record.
///
/// ## Invariants
/// - `password_hash`, when present, is a PHC-format string produced by the
///   internal source's hasher. Accounts without a hash (externally
///   authenticated ones) can never pass internal credential checks.
/// - Deactivated accounts are rejected by every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: Option<String>,
    active: bool,
}

impl User {
    /// Build an active account without stored credentials.
    pub const fn new(id: UserId, username: Username) -> Self {
        Self {
            id,
            username,
            password_hash: None,
            active: true,
        }
    }

    /// Attach a stored password hash.
    #[must_use]
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Set the account's active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Stable identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Login identifier.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored PHC-format password hash, if the account has one.
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// Whether the account may log in at all.
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests;

//! User-facing authentication message catalog.
//!
//! The closed `MessageKey` enum replaces the original string-keyed catalog so
//! an unknown key is unrepresentable. Each key maps to the exact text used by
//! pgadmin's `BaseAuthentication.DEFAULT_MSG`; sources may override individual
//! entries through `AuthSource::messages`.

/// Closed catalog of authentication messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MessageKey {
    /// No identifier was supplied.
    EmailNotProvided,
    /// No password was supplied.
    PasswordNotProvided,
    /// The identifier did not resolve to a user, or the password was wrong.
    UserDoesNotExist,
    /// Credential verification raised an unexpected failure.
    LoginFailed,
    /// The supplied identifier is not a well-formed email/username.
    InvalidEmail,
}

impl MessageKey {
    /// The fixed, user-facing text for this key.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::EmailNotProvided => "Email/Username not provided",
            Self::PasswordNotProvided => "Password not provided",
            Self::UserDoesNotExist => "Incorrect username or password.",
            Self::LoginFailed => "Login failed",
            Self::InvalidEmail => "Email/Username is not valid",
        }
    }
}

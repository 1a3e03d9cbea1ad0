//! Login form model shared by every authentication source.
//!
//! Keep inbound payload parsing outside the domain: the HTTP adapter builds a
//! [`LoginForm`] from the request body and sources attach field-level catalog
//! messages to it while validating. The form is ephemeral and never outlives
//! the attempt it describes.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use crate::domain::User;

/// Form fields that can carry validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Identifier field; an email address for the internal source.
    Email,
    /// Secret field.
    Password,
}

impl LoginField {
    /// Wire name used when reporting the field back to clients.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation message attached to a specific form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    field: LoginField,
    message: &'static str,
}

impl FieldError {
    /// Field the message belongs to.
    pub const fn field(&self) -> LoginField {
        self.field
    }

    /// Catalog text for UI display next to the field.
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

/// One login attempt's input.
///
/// ## Invariants
/// - `email` is trimmed; emptiness is reported through validation, not
///   construction, so sources control the message.
/// - `password` retains caller-provided whitespace to avoid surprising
///   credential comparisons, and is zeroised on drop.
/// - `user` is only populated by a source that has resolved the account,
///   letting the login step skip a second store query.
#[derive(Debug)]
pub struct LoginForm {
    email: String,
    password: Zeroizing<String>,
    user: Option<User>,
    errors: Vec<FieldError>,
}

impl LoginForm {
    /// Build a form from raw request values.
    pub fn new(email: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            email: email.as_ref().trim().to_owned(),
            password: Zeroizing::new(password.into()),
            user: None,
            errors: Vec::new(),
        }
    }

    /// Identifier as submitted, trimmed.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Secret as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Account resolved by an earlier step, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Attach the resolved account so later steps can reuse it.
    pub fn attach_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Record a field-level validation message.
    pub fn attach_error(&mut self, field: LoginField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Messages recorded so far, in attachment order.
    pub fn errors(&self) -> &[FieldError] {
        self.errors.as_slice()
    }

    /// True when no validation message has been attached.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: one @, non-empty local part, dotted domain.
        // Deliverability is the mail system's problem.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Basic email shape check used by the internal source's identifier rule.
pub fn is_email_shaped(value: &str) -> bool {
    email_regex().is_match(value)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn form_trims_email_and_keeps_password_whitespace() {
        let form = LoginForm::new("  admin@example.com  ", " hunter2 ");
        assert_eq!(form.email(), "admin@example.com");
        assert_eq!(form.password(), " hunter2 ");
        assert!(form.is_clean());
        assert!(form.user().is_none());
    }

    #[test]
    fn attached_errors_preserve_order_and_field() {
        let mut form = LoginForm::new("", "");
        form.attach_error(LoginField::Email, "first");
        form.attach_error(LoginField::Password, "second");

        let errors = form.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().map(FieldError::field), Some(LoginField::Email));
        assert_eq!(errors.first().map(FieldError::message), Some("first"));
        assert_eq!(errors.last().map(FieldError::field), Some(LoginField::Password));
        assert!(!form.is_clean());
    }

    #[rstest]
    #[case("admin@example.com")]
    #[case("user.name+tag@example.co.uk")]
    #[case("a@b.co")]
    fn well_shaped_emails_pass(#[case] value: &str) {
        assert!(is_email_shaped(value));
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("@example.com")]
    #[case("admin@")]
    #[case("admin@host")]
    #[case("admin@@example.com")]
    #[case("admin example@example.com")]
    fn malformed_emails_fail(#[case] value: &str) {
        assert!(!is_email_shaped(value));
    }

    #[test]
    fn field_names_match_wire_contract() {
        assert_eq!(LoginField::Email.as_str(), "email");
        assert_eq!(LoginField::Password.as_str(), "password");
    }
}

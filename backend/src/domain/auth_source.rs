//! Authentication source contract.
//!
//! A source is one pluggable implementation of the login contract for a
//! single identity backend. The trait provides the shared behaviour every
//! source inherits: presence checks over the form fields and the final
//! login step that resolves the account and hands it to the session
//! framework. Sources override `validate` to impose identifier shape rules
//! and must implement `authenticate` for their backend.
//!
//! Source futures are deliberately not `Send`: the session gateway wraps
//! per-request cookie state, and login attempts never leave the
//! request-handling thread.

use async_trait::async_trait;

use crate::domain::ports::{SessionGateway, UserRepository};
use crate::domain::{LoginField, LoginForm, MessageKey};

/// Registry key of the internal (database credential) source.
pub const INTERNAL: &str = "internal";
/// Registry key reserved for an LDAP source.
pub const LDAP: &str = "ldap";
/// Registry key reserved for an OAuth 2 source.
pub const OAUTH2: &str = "oauth2";

/// Result of one contract step: a success flag plus an optional
/// human-readable failure message drawn from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    ok: bool,
    message: Option<&'static str>,
}

impl Outcome {
    /// Successful step; carries no message.
    pub const fn success() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    /// Failed step with a catalog message for the caller.
    pub const fn failure(message: &'static str) -> Self {
        Self {
            ok: false,
            message: Some(message),
        }
    }

    /// Whether the step succeeded.
    pub const fn is_success(&self) -> bool {
        self.ok
    }

    /// Failure message, absent on success.
    pub const fn message(&self) -> Option<&'static str> {
        self.message
    }
}

/// Contract every authentication source satisfies.
#[async_trait(?Send)]
pub trait AuthSource: Send + Sync {
    /// Stable identifier used for registry lookup and audit logging.
    fn source_name(&self) -> &'static str;

    /// Human-readable label for UI display.
    fn friendly_name(&self) -> &'static str;

    /// User store this source resolves accounts against.
    fn repository(&self) -> &dyn UserRepository;

    /// Catalog text for `key`; sources may override individual entries.
    fn messages(&self, key: MessageKey) -> &'static str {
        key.text()
    }

    /// Check the form's input shape, attaching field-level messages on
    /// failure. Fails closed: a form that cannot be validated never reaches
    /// credential verification.
    fn validate(&self, form: &mut LoginForm) -> bool {
        self.validate_credentials_present(form)
    }

    /// Shared presence checks used by `validate` implementations: both
    /// fields must be non-empty.
    fn validate_credentials_present(&self, form: &mut LoginForm) -> bool {
        if form.email().is_empty() {
            form.attach_error(
                LoginField::Email,
                self.messages(MessageKey::EmailNotProvided),
            );
            return false;
        }
        if form.password().is_empty() {
            form.attach_error(
                LoginField::Password,
                self.messages(MessageKey::PasswordNotProvided),
            );
            return false;
        }
        true
    }

    /// Verify the submitted credentials against this source's backend.
    ///
    /// Succeeds only when a matching account exists and the credential
    /// check passes; on success the resolved account is attached to the
    /// form. Every failure carries the same non-enumerating message.
    async fn authenticate(&self, form: &mut LoginForm) -> Outcome;

    /// Resolve the target account and delegate to the session framework.
    ///
    /// Reuses an account already attached to the form, otherwise queries
    /// the store by identifier. When no account exists the session gateway
    /// is never touched.
    async fn login(&self, form: &LoginForm, session: &dyn SessionGateway) -> Outcome {
        let user = match form.user() {
            Some(user) => user.clone(),
            None => match self.repository().find_by_username(form.email()).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    tracing::warn!(
                        source = self.source_name(),
                        "login attempt for unknown user"
                    );
                    return Outcome::failure(self.messages(MessageKey::UserDoesNotExist));
                }
                Err(error) => {
                    tracing::error!(
                        source = self.source_name(),
                        error = %error,
                        "user store lookup failed during login"
                    );
                    return Outcome::failure(self.messages(MessageKey::UserDoesNotExist));
                }
            },
        };

        if let Err(error) = session.establish(&user) {
            tracing::error!(
                source = self.source_name(),
                user = %user.id(),
                error = %error,
                "session framework rejected login"
            );
            return Outcome::failure(self.messages(MessageKey::LoginFailed));
        }

        tracing::info!(
            source = self.source_name(),
            user = %user.id(),
            "session established"
        );
        Outcome::success()
    }
}

//! Internal authentication source.
//!
//! Authenticates against password hashes stored in the user store. This
//! source owns credential verification end to end: the submitted secret is
//! checked here against the stored Argon2 hash, never in an upstream form
//! layer. Identifiers must look like email addresses.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::auth::is_email_shaped;
use crate::domain::ports::UserRepository;
use crate::domain::{AuthSource, INTERNAL, LoginField, LoginForm, MessageKey, Outcome};

/// Hash a password for storage, producing a PHC-format Argon2 string.
///
/// Used when seeding the user store; verification happens in
/// [`InternalAuth::authenticate`].
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(candidate: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(error) => {
            tracing::error!(error = %error, "stored password hash is not a valid PHC string");
            false
        }
    }
}

/// Database credential strategy.
pub struct InternalAuth {
    repository: Arc<dyn UserRepository>,
}

impl InternalAuth {
    /// Build the source over the given user store.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait(?Send)]
impl AuthSource for InternalAuth {
    fn source_name(&self) -> &'static str {
        INTERNAL
    }

    fn friendly_name(&self) -> &'static str {
        "internal"
    }

    fn repository(&self) -> &dyn UserRepository {
        self.repository.as_ref()
    }

    fn validate(&self, form: &mut LoginForm) -> bool {
        // Shape-check the identifier first; presence checks cover the
        // empty case with their own message.
        if !form.email().is_empty() && !is_email_shaped(form.email()) {
            form.attach_error(LoginField::Email, self.messages(MessageKey::InvalidEmail));
            return false;
        }
        self.validate_credentials_present(form)
    }

    async fn authenticate(&self, form: &mut LoginForm) -> Outcome {
        let rejection = Outcome::failure(self.messages(MessageKey::UserDoesNotExist));

        // Validation precedes credential verification; a form carrying
        // shape errors can never authenticate.
        if !form.is_clean() {
            return rejection;
        }

        let user = match self.repository.find_by_username(form.email()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(source = INTERNAL, "authentication for unknown user");
                return rejection;
            }
            Err(error) => {
                tracing::error!(
                    source = INTERNAL,
                    error = %error,
                    "user store lookup failed during authentication"
                );
                return rejection;
            }
        };

        if !user.is_active() {
            tracing::warn!(
                source = INTERNAL,
                user = %user.id(),
                "authentication for deactivated account"
            );
            return rejection;
        }

        let Some(stored) = user.password_hash() else {
            tracing::warn!(
                source = INTERNAL,
                user = %user.id(),
                "account has no stored credentials"
            );
            return rejection;
        };

        if !verify_password(form.password(), stored) {
            tracing::warn!(
                source = INTERNAL,
                user = %user.id(),
                "password verification failed"
            );
            return rejection;
        }

        form.attach_user(user);
        Outcome::success()
    }
}

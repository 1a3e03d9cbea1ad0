//! Port abstraction for the session framework.
//!
//! Establishing a session is the single outbound call the login flow makes
//! once credentials are verified. Adapters wrap whatever the web framework
//! uses to track logins; the cookie-session adapter lives in the HTTP layer.
//!
//! Gateways wrap per-request state that is not `Send`, so the trait carries
//! no threading bounds and source futures stay on the request-handling
//! thread.

use crate::domain::User;

/// Errors raised while establishing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionGatewayError {
    /// The session framework refused or failed to record the login.
    #[error("session establishment failed: {message}")]
    Establish {
        /// Adapter-provided context.
        message: String,
    },
}

impl SessionGatewayError {
    /// Build a [`SessionGatewayError::Establish`].
    pub fn establish(message: impl Into<String>) -> Self {
        Self::Establish {
            message: message.into(),
        }
    }
}

/// Session framework primitive: record `user` as logged in for the current
/// request context.
#[cfg_attr(test, mockall::automock)]
pub trait SessionGateway {
    /// Establish a logged-in session for the resolved account.
    fn establish(&self, user: &User) -> Result<(), SessionGatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn establish_errors_carry_context() {
        let err = SessionGatewayError::establish("cookie jar full");
        assert_eq!(
            err.to_string(),
            "session establishment failed: cookie jar full"
        );
    }
}

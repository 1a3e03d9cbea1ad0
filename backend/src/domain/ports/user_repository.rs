//! Port abstraction for the user store.
//!
//! The authentication layer performs exactly one read against the store:
//! resolving an account by its login identifier. Account creation and
//! mutation belong to whichever component owns the store.

use async_trait::async_trait;

use crate::domain::User;

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Adapter-provided context.
        message: String,
    },
    /// Lookup failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Adapter-provided context.
        message: String,
    },
}

impl UserPersistenceError {
    /// Build a [`UserPersistenceError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserPersistenceError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only view of the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the account whose login identifier matches `username` exactly.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_accept_str_context() {
        let err = UserPersistenceError::query("row decode failed");
        assert_eq!(err.to_string(), "user store query failed: row decode failed");

        let err = UserPersistenceError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "user store connection failed: pool exhausted"
        );
    }
}

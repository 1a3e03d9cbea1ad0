//! In-memory user store.
//!
//! Backs the `UserRepository` port for development deployments and tests.
//! Records are keyed by username; inserting an existing username replaces
//! the record.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// RwLock-backed user store adapter.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the given accounts.
    pub fn seeded(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.username().as_ref().to_owned(), user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Insert or replace an account, keyed by username.
    pub fn insert(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        users.insert(user.username().as_ref().to_owned(), user);
        Ok(())
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        Ok(users.len())
    }

    /// True when the store holds no accounts.
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        Ok(users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{UserId, Username};

    fn user(name: &str) -> User {
        let username = Username::new(name).expect("valid username");
        User::new(UserId::random(), username)
    }

    #[tokio::test]
    async fn lookup_hits_and_misses() {
        let store = InMemoryUserRepository::seeded([user("ada@example.com")]);

        let found = store
            .find_by_username("ada@example.com")
            .await
            .expect("lookup succeeds");
        assert!(found.is_some());

        let missing = store
            .find_by_username("grace@example.com")
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn insert_replaces_by_username() {
        let store = InMemoryUserRepository::new();
        assert!(store.is_empty().expect("lock healthy"));

        store.insert(user("ada@example.com")).expect("inserts");
        let replacement = user("ada@example.com").with_active(false);
        store.insert(replacement).expect("inserts");

        assert_eq!(store.len().expect("lock healthy"), 1);
        let found = store
            .find_by_username("ada@example.com")
            .await
            .expect("lookup succeeds")
            .expect("record present");
        assert!(!found.is_active());
    }
}

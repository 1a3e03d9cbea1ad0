//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::sources::{InternalAuth, hash_password};
use crate::domain::{AuthService, AuthSource, AuthSourceRegistry, INTERNAL, User, UserId, Username};
use crate::inbound::http::state::HttpState;
use crate::outbound::InMemoryUserRepository;

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing key per invocation and disables the `Secure`
/// flag for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over an in-memory store seeded with one account,
/// `admin@example.com` / `password`, authenticated by the internal source.
pub fn seeded_state() -> HttpState {
    let username = Username::new("admin@example.com").expect("valid username");
    let hash = hash_password("password").expect("hashing succeeds");
    let admin = User::new(UserId::random(), username).with_password_hash(hash);

    let store = Arc::new(InMemoryUserRepository::seeded([admin]));
    let internal = Arc::new(InternalAuth::new(store)) as Arc<dyn AuthSource>;
    let registry = AuthSourceRegistry::with_sources([internal]).expect("internal registers");
    let auth = Arc::new(AuthService::new(Arc::new(registry), INTERNAL));

    HttpState::new(auth)
}

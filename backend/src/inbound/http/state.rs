//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain use-case and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AuthService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login use-case over the source registry.
    pub auth: Arc<AuthService>,
}

impl HttpState {
    /// Bundle the authentication service for handler injection.
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

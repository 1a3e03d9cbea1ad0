//! Domain primitives and the authentication use-case.
//!
//! Purpose: define the authentication-source contract, the registry that
//! holds the configured sources, and the orchestration service that drives a
//! login attempt. Transport concerns stay in the inbound adapters;
//! persistence and session frameworks are reached through `ports` only.

pub mod auth;
pub mod auth_source;
pub mod error;
pub mod login_service;
pub mod messages;
pub mod ports;
pub mod registry;
pub mod sources;
pub mod user;

pub use self::auth::{FieldError, LoginField, LoginForm, is_email_shaped};
pub use self::auth_source::{AuthSource, INTERNAL, LDAP, OAUTH2, Outcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::{AuthService, RegisteredSource};
pub use self::messages::MessageKey;
pub use self::registry::{AuthSourceRegistry, RegistryError};
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;

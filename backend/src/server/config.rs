//! Server configuration assembled from the environment.
//!
//! Everything the binary needs to boot: bind address, session cookie
//! settings, the active authentication source, and the optional bootstrap
//! account seeded into the user store.

use std::net::SocketAddr;

use mockable::Env;
use zeroize::Zeroizing;

use crate::domain::INTERNAL;
use crate::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};

const BIND_ADDR_ENV: &str = "PGPORTAL_BIND_ADDR";
const AUTH_SOURCE_ENV: &str = "PGPORTAL_AUTH_SOURCE";
const BOOTSTRAP_EMAIL_ENV: &str = "PGPORTAL_BOOTSTRAP_EMAIL";
const BOOTSTRAP_PASSWORD_ENV: &str = "PGPORTAL_BOOTSTRAP_PASSWORD";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    8080,
);

/// Initial account seeded into the user store at startup.
pub struct BootstrapAdmin {
    /// Login identifier for the account.
    pub email: String,
    /// Plaintext password, hashed before storage and zeroised on drop.
    pub password: Zeroizing<String>,
}

/// Errors raised while validating server configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Session cookie settings were invalid.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },
    /// Only one half of the bootstrap credentials was provided.
    #[error("PGPORTAL_BOOTSTRAP_EMAIL and PGPORTAL_BOOTSTRAP_PASSWORD must be set together")]
    PartialBootstrap,
}

/// Validated configuration for [`crate::server::run`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session: SessionSettings,
    pub(crate) active_source: String,
    pub(crate) bootstrap: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Build the configuration from environment variables.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let bind_addr = match env.string(BIND_ADDR_ENV) {
            Some(value) => match value.parse() {
                Ok(addr) => addr,
                Err(_) => {
                    return Err(ConfigError::InvalidEnv {
                        name: BIND_ADDR_ENV,
                        value,
                        expected: "host:port",
                    });
                }
            },
            None => DEFAULT_BIND_ADDR,
        };

        let active_source = env
            .string(AUTH_SOURCE_ENV)
            .unwrap_or_else(|| INTERNAL.to_owned());

        let bootstrap = match (
            env.string(BOOTSTRAP_EMAIL_ENV),
            env.string(BOOTSTRAP_PASSWORD_ENV),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password: Zeroizing::new(password),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialBootstrap),
        };

        let session = session_settings_from_env(env, mode)?;

        Ok(Self {
            bind_addr,
            session,
            active_source,
            bootstrap,
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Name of the source that handles login attempts.
    #[must_use]
    pub fn active_source(&self) -> &str {
        self.active_source.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;

    use mockable::MockEnv;

    use super::*;

    fn mock_env(vars: HashMap<String, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[test]
    fn debug_defaults_bind_and_source() {
        let env = mock_env(HashMap::new());
        let config = ServerConfig::from_env(&env, BuildMode::Debug).expect("defaults apply");

        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.active_source(), INTERNAL);
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn bind_address_overrides_are_parsed() {
        let env = mock_env(HashMap::from([(
            BIND_ADDR_ENV.to_owned(),
            "127.0.0.1:9099".to_owned(),
        )]));
        let config = ServerConfig::from_env(&env, BuildMode::Debug).expect("valid address");
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9099");
    }

    #[test]
    fn malformed_bind_addresses_are_rejected() {
        let env = mock_env(HashMap::from([(
            BIND_ADDR_ENV.to_owned(),
            "not-an-address".to_owned(),
        )]));
        let error = ServerConfig::from_env(&env, BuildMode::Debug)
            .err()
            .expect("invalid address must fail");
        assert!(matches!(error, ConfigError::InvalidEnv { name, .. } if name == BIND_ADDR_ENV));
    }

    #[test]
    fn bootstrap_requires_both_halves() {
        let env = mock_env(HashMap::from([(
            BOOTSTRAP_EMAIL_ENV.to_owned(),
            "admin@example.com".to_owned(),
        )]));
        let error = ServerConfig::from_env(&env, BuildMode::Debug)
            .err()
            .expect("partial bootstrap must fail");
        assert!(matches!(error, ConfigError::PartialBootstrap));
    }

    #[test]
    fn bootstrap_credentials_are_captured() {
        let env = mock_env(HashMap::from([
            (BOOTSTRAP_EMAIL_ENV.to_owned(), "admin@example.com".to_owned()),
            (BOOTSTRAP_PASSWORD_ENV.to_owned(), "hunter2".to_owned()),
            (AUTH_SOURCE_ENV.to_owned(), "ldap".to_owned()),
        ]));
        let config = ServerConfig::from_env(&env, BuildMode::Debug).expect("valid config");

        assert_eq!(config.active_source(), "ldap");
        let bootstrap = config.bootstrap.as_ref().expect("bootstrap captured");
        assert_eq!(bootstrap.email, "admin@example.com");
        assert_eq!(bootstrap.password.as_str(), "hunter2");
    }
}

//! Login orchestration over the source registry.
//!
//! Drives one attempt through the contract in order: select the configured
//! source, validate input shape, verify credentials, establish the session.
//! The first failing step terminates the attempt; nothing is retried and no
//! session state survives a failure.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::SessionGateway;
use crate::domain::registry::AuthSourceRegistry;
use crate::domain::{Error, FieldError, LoginForm, MessageKey};

/// Registry entry described for login-page display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredSource {
    /// Stable source name used in configuration.
    #[schema(example = "internal")]
    pub name: String,
    /// Human-readable label.
    #[schema(example = "internal")]
    pub friendly_name: String,
    /// Whether this source handles login attempts.
    pub active: bool,
}

/// Use-case service owning the login flow.
pub struct AuthService {
    registry: Arc<AuthSourceRegistry>,
    active_source: String,
}

impl AuthService {
    /// Build the service around a populated registry and the configured
    /// active source name.
    pub fn new(registry: Arc<AuthSourceRegistry>, active_source: impl Into<String>) -> Self {
        Self {
            registry,
            active_source: active_source.into(),
        }
    }

    /// Run one login attempt to completion.
    ///
    /// Exactly one source, the configured one, handles the attempt. On
    /// success the session gateway has recorded the login; on failure the
    /// returned error carries either field details (shape errors) or the
    /// source's non-enumerating message (credential errors).
    pub async fn login(
        &self,
        mut form: LoginForm,
        session: &dyn SessionGateway,
    ) -> Result<(), Error> {
        let source = self.registry.lookup(&self.active_source).map_err(|error| {
            tracing::error!(error = %error, "active authentication source missing from registry");
            Error::internal(error.to_string())
        })?;

        if !source.validate(&mut form) {
            return Err(shape_error(&form));
        }

        let outcome = source.authenticate(&mut form).await;
        if !outcome.is_success() {
            let message = outcome
                .message()
                .unwrap_or(MessageKey::UserDoesNotExist.text());
            return Err(Error::unauthorized(message));
        }

        let outcome = source.login(&form, session).await;
        if !outcome.is_success() {
            let message = outcome.message().unwrap_or(MessageKey::LoginFailed.text());
            return Err(Error::unauthorized(message));
        }

        Ok(())
    }

    /// Describe the registered sources, flagging the active one, in
    /// registration order.
    pub fn sources(&self) -> Vec<RegisteredSource> {
        self.registry
            .iter()
            .map(|source| RegisteredSource {
                name: source.source_name().to_owned(),
                friendly_name: source.friendly_name().to_owned(),
                active: source.source_name() == self.active_source,
            })
            .collect()
    }
}

fn shape_error(form: &LoginForm) -> Error {
    let fields: Vec<_> = form
        .errors()
        .iter()
        .map(|error| {
            json!({
                "field": error.field().as_str(),
                "message": error.message(),
            })
        })
        .collect();
    let message = form
        .errors()
        .first()
        .map(FieldError::message)
        .unwrap_or("Invalid login request");

    Error::invalid_request(message).with_details(json!({ "fields": fields }))
}

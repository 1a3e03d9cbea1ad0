//! Server construction and middleware wiring.

mod config;

pub use config::{BootstrapAdmin, ConfigError, ServerConfig};

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::dev::HttpServiceFactory;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::domain::sources::{InternalAuth, hash_password};
use crate::domain::{AuthService, AuthSource, AuthSourceRegistry, User, UserId, Username};
use crate::inbound::http::auth::{auth_sources, login, logout};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::InMemoryUserRepository;

/// Build the cookie session middleware from validated settings.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(settings.same_site)
        .build()
}

/// Authentication API scope mounted under `/api/v1`.
pub fn api_scope(
    state: HttpState,
    session: SessionMiddleware<CookieSessionStore>,
) -> impl HttpServiceFactory {
    web::scope("/api/v1")
        .wrap(session)
        .app_data(web::Data::new(state))
        .service(login)
        .service(logout)
        .service(auth_sources)
}

/// Wire the registry, user store, and login service from configuration.
///
/// Fails fast when the configured active source is not registered so a typo
/// in `PGPORTAL_AUTH_SOURCE` surfaces at boot instead of on the first login.
pub fn build_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let store = Arc::new(InMemoryUserRepository::new());

    if let Some(bootstrap) = &config.bootstrap {
        let username = Username::new(bootstrap.email.as_str())
            .map_err(|error| std::io::Error::other(format!("invalid bootstrap email: {error}")))?;
        let hash = hash_password(&bootstrap.password).map_err(|error| {
            std::io::Error::other(format!("bootstrap password hashing failed: {error}"))
        })?;
        let account = User::new(UserId::random(), username).with_password_hash(hash);
        store
            .insert(account)
            .map_err(|error| std::io::Error::other(error.to_string()))?;
        tracing::info!(email = %bootstrap.email, "bootstrap account seeded");
    } else {
        tracing::warn!(
            "user store is empty; set PGPORTAL_BOOTSTRAP_EMAIL and \
             PGPORTAL_BOOTSTRAP_PASSWORD to seed an account"
        );
    }

    let internal = Arc::new(InternalAuth::new(store)) as Arc<dyn AuthSource>;
    let registry = Arc::new(
        AuthSourceRegistry::with_sources([internal])
            .map_err(|error| std::io::Error::other(error.to_string()))?,
    );
    registry
        .lookup(config.active_source())
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    let auth = Arc::new(AuthService::new(registry, config.active_source()));
    Ok(HttpState::new(auth))
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = build_state(&config)?;
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();

    let ServerConfig {
        bind_addr, session, ..
    } = config;

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .service(api_scope(state.clone(), session_middleware(&session)))
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

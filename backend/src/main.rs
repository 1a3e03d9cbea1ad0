//! Backend entry-point: wires the authentication API over cookie sessions.

use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use pgportal_backend::inbound::http::session_config::BuildMode;
use pgportal_backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mode = BuildMode::from_debug_assertions();
    let config = ServerConfig::from_env(&DefaultEnv::new(), mode)
        .map_err(|error| std::io::Error::other(format!("configuration invalid: {error}")))?;

    server::run(config).await
}

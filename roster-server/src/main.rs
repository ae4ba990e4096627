//! # Roster Server
//!
//! Role-based user directory service.
//!
//! Users hold one or more of the Admin, Modifier, and Watcher roles. Callers
//! assert their own role in the `X-User-Type` header, and the role hierarchy
//! decides which users they may create, re-role, or delete. Records live in
//! memory for the lifetime of the process.

use anyhow::Context;
use clap::Parser;
use roster_server::{
    AppState, create_app,
    infra::{
        config::{self, Config, ConfigLoadError, HOST_VAR, PORT_VAR},
        shutdown::shutdown_signal,
    },
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(about = "Role-based user directory service")]
struct Cli {
    /// Server port
    #[arg(short, long, env = PORT_VAR)]
    port: Option<String>,

    /// Server host (IP address)
    #[arg(long, env = HOST_VAR)]
    host: Option<String>,
}

impl Cli {
    /// Resolve flags, falling back to the environment, into a [`Config`]
    fn into_config(self, env_file_loaded: bool) -> Result<Config, ConfigLoadError> {
        let mut config = Config::from_lookup(|key| match key {
            PORT_VAR => self.port.clone(),
            HOST_VAR => self.host.clone(),
            _ => None,
        })?;
        config.metadata.env_file_loaded = env_file_loaded;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env has to be in the environment before clap reads its fallbacks
    let env_file_loaded = config::load_env_file();
    let config = Cli::parse()
        .into_config(env_file_loaded)
        .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    let addr = config.socket_addr().context("invalid listen address")?;
    let state = AppState::with_empty_store(config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

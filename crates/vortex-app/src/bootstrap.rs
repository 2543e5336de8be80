//! Application bootstrap and shutdown sequencing.
//!
//! # Design
//! - Configuration is loaded once and passed explicitly into every
//!   component; no ambient global state.
//! - The auxiliary listener starts only when its credential is configured;
//!   its absence is logged, not fatal.
//! - Shutdown order: drain the HTTP server, then stop and await the
//!   listener supervisor so no task survives the process.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use vortex_api::ApiServer;
use vortex_config::{AppConfig, ListenerConfig};
use vortex_core::JobRunner;
use vortex_notify::{AllowList, Listener, ListenerSupervisor, TelegramTransport};
use vortex_store::ArtifactStore;
use vortex_telemetry::LoggingConfig;
use vortex_ytdlp::YtDlpFetcher;

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the Vortex application.
pub(crate) struct BootstrapDependencies {
    logging: LoggingConfig<'static>,
    config: AppConfig,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary
    /// entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            AppConfig::from_env().map_err(|err| AppError::config("app_config.from_env", err))?;
        Ok(Self {
            logging: LoggingConfig::default(),
            config,
        })
    }
}

/// Entry point for the Vortex application boot sequence.
///
/// # Errors
///
/// Returns an error if dependency construction or application startup fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies to simplify
/// testing.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    vortex_telemetry::init_logging(&dependencies.logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    info!("Vortex application bootstrap starting");
    let BootstrapDependencies { logging: _, config } = dependencies;

    let store = ArtifactStore::new(&config.downloads_dir);
    store
        .ensure_root()
        .map_err(|err| AppError::store("store.ensure_root", err))?;
    info!(downloads_dir = %store.root().display(), "artifact store ready");

    let jobs = Arc::new(JobRunner::new(Arc::new(YtDlpFetcher::new()), store.clone()));

    let mut supervisor = ListenerSupervisor::new();
    if let Some(listener_config) = &config.listener {
        info!("Starting auxiliary listener");
        supervisor.start(build_listener(listener_config, &config.public_app_url));
    } else {
        info!("listener credential not set; auxiliary listener disabled");
    }

    let api = ApiServer::new(config.access_key.clone(), jobs, store);
    let addr = SocketAddr::new(config.bind_addr, config.http_port);
    info!(addr = %addr, "Launching API listener");

    let serve_result = api.serve_until(addr, shutdown_signal()).await;

    supervisor.stop().await;

    serve_result.map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("gateway shutdown complete");
    Ok(())
}

fn build_listener(config: &ListenerConfig, app_url: &str) -> Listener<TelegramTransport> {
    let transport = TelegramTransport::new(&config.bot_token);
    let allow_list = AllowList::new(config.allowed_user_ids.iter().copied());
    Listener::new(transport, allow_list, app_url)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install shutdown signal handler");
        std::future::pending::<()>().await;
    }
}

//! Students API server: loads config, opens the SQLite store, serves HTTP until Ctrl-C / SIGTERM.
//!
//! Run from repo root: `CONFIG_PATH=config.example.toml cargo run -p students-server`
//! Or: `cargo run -p students-server -- --config config.example.toml`

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use students_api::{app, resolve_config_path, AppState, Config, SqliteStorage};
use tokio::net::TcpListener;

/// Grace period for in-flight requests once a shutdown signal arrives.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "students-server")]
#[command(version, about = "JSON REST service for student records", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (CONFIG_PATH takes precedence)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "students_api=info,students_server=info,tower_http=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config)?;
    let config = Config::load(&config_path)?;

    let storage = match SqliteStorage::connect(&config).await {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::error!(
                error = %e,
                storage_path = %config.storage_path,
                "failed to initialise storage"
            );
            return Err(e.into());
        }
    };
    tracing::info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        "storage initialised"
    );

    let state = AppState::new(storage.clone());
    let listener = TcpListener::bind(&config.http_server.address).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app(state))
            .with_graceful_shutdown(async {
                stop_rx.await.ok();
            })
            .await
    });

    shutdown_signal().await;
    tracing::info!("server is shutting down");
    stop_tx.send(()).ok();

    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "server error during shutdown"),
        Ok(Err(e)) => tracing::error!(error = %e, "server task failed"),
        Err(_) => tracing::error!(
            grace_secs = SHUTDOWN_GRACE.as_secs(),
            "in-flight requests did not finish before the grace period"
        ),
    }

    storage.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

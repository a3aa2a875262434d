use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Resolves once the process is asked to stop. Used as the graceful
/// shutdown trigger for the HTTP server.
#[cfg(unix)]
pub async fn shutdown_signal() {
    // SIGTERM from container runtimes, SIGINT from Ctrl+C
    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to create SIGTERM signal handler");
    let mut sigint =
        signal(SignalKind::interrupt()).expect("Failed to create SIGINT signal handler");

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

#[cfg(not(unix))]
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to create Ctrl+C signal handler");
    info!("Received Ctrl+C signal, initiating graceful shutdown");
}

//! Server module exposing paged sources over HTTP
//!
//! This module provides:
//! - A generic `GET` handler computing one page of a data source
//! - A router builder mounting that handler on a path
//! - A `serve` helper with graceful shutdown

pub mod router;

pub use router::{PagedState, list_page, paged_router};

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

/// Serve `app` on `addr` until Ctrl+C or SIGTERM
///
/// # Example
///
/// ```ignore
/// let app = paged_router::<Customer, _>("/customers", Arc::new(source), config);
/// serve(app, "127.0.0.1:3000").await?;
/// ```
pub async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

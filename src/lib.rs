//! # CORS Dev Server
//!
//! A static file server for local front-end development.
//!
//! It serves a directory over HTTP with permissive CORS headers and caching
//! disabled, so a dev front-end on another origin can fetch generated files
//! (e.g. dictionary JSON) straight from disk.
//!
//! On startup the server:
//!
//! 1. Scans for a free port, starting at 8000.
//! 2. Writes that port to a `.cors_port` file so the front-end tooling can
//!    find it.
//! 3. Serves the directory until Ctrl+C, then deletes the port file.
//!
//! ## Example
//!
//! ```no_run
//! use cors_dev_server::{Config, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     serve(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod port_record;
pub mod ports;
pub mod router;

use std::{io, path};

use tokio::{net::TcpListener, signal};

pub use config::Config;
pub use error::{Error, Result};
pub use port_record::PortRecord;
pub use ports::{bind_available_port, find_available_port};
pub use router::cors_router;

/// Runs the server until Ctrl+C (or `SIGTERM` on Unix).
///
/// # Errors
///
/// Returns an error if the root cannot be served, no port is free, or the
/// port record cannot be written or removed.
pub async fn serve(config: &Config) -> Result<()> {
    serve_with_shutdown(config, shutdown_signal()).await
}

/// Runs the server until `shutdown` resolves.
///
/// The port record exists from just after the port is bound until the
/// server has stopped. It is also removed if serving fails.
///
/// # Errors
///
/// Same as [`serve`].
pub async fn serve_with_shutdown<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let root = tokio::fs::canonicalize(&config.root)
        .await
        .map_err(|source| Error::Root {
            path: config.root.clone(),
            source,
        })?;
    if !root.is_dir() {
        return Err(Error::Root {
            path: config.root.clone(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    let port_file = path::absolute(&config.port_file)?;

    let (listener, port) = bind_available_port(config.start_port, config.max_attempts)?;
    listener.set_nonblocking(true)?;
    let listener = TcpListener::from_std(listener)?;

    let record = PortRecord::create(port_file, port)?;

    println!("🚀 CORS-enabled HTTP server running on http://localhost:{port}/");
    println!("📁 Serving files from: {}", root.display());
    println!("📝 Port written to: {}", record.path().display());
    println!("💡 Press Ctrl+C to stop");
    tracing::info!(port, root = %root.display(), "server started");

    axum::serve(listener, cors_router(&root))
        .with_graceful_shutdown(async move {
            shutdown.await;
            println!("\n👋 Shutting down server...");
        })
        .await?;

    record.remove()?;
    tracing::info!("server stopped");

    Ok(())
}

/// Resolves on Ctrl+C, or on `SIGTERM` on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::debug!("received Ctrl+C"),
        () = terminate => tracing::debug!("received SIGTERM"),
    }
}

//! Serves the current directory with CORS enabled for local development.
//!
//! # Usage
//!
//! ```bash
//! cd output_dictionary && cargo run --bin cors_server
//! ```
//!
//! The chosen port is written to `.cors_port` in the served directory and
//! removed on Ctrl+C. See [`cors_dev_server::config`] for the environment
//! variables that override the defaults.

use tracing_subscriber::EnvFilter;

use cors_dev_server::{Config, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    serve(&config).await?;

    Ok(())
}

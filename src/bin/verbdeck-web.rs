//! Verbdeck Web Server Binary
//!
//! This binary starts the Verbdeck web server that serves the verb catalog
//! page by page over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (port 3001, bundled catalog)
//! verbdeck-web
//!
//! # Specify port and data file
//! verbdeck-web --port 8080 --data ./verbs.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verbdeck::config::Config;
use verbdeck::web;

/// Verbdeck Web Server - paged verb catalog API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to `server.port` from config.toml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to `server.host` from config.toml)
    #[arg(long)]
    host: Option<String>,

    /// Verb data file (defaults to `paths.data_file`, then the bundled catalog)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {:#}", e);
        Config::default()
    });

    let data_file = args.data.or(config.paths.data_file);
    match &data_file {
        Some(path) => info!("Verb data file: {}", path.display()),
        None => info!("Serving the bundled verb catalog"),
    }

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    web::run_server(data_file, addr).await
}

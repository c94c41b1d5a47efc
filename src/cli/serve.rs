//! `verbdeck serve`: run the paged verb API in the foreground.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::web;
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve `GET /api/verbs` over HTTP
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Host to bind to (defaults to `server.host`)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (defaults to `server.port`)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verb data file (defaults to `paths.data_file`, then the bundled catalog)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Socket address resolved from the arguments and configuration.
    pub fn address(&self, host: &str, port: u16) -> CliResult<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(host);
        let port = self.port.unwrap_or(port);
        format!("{host}:{port}")
            .parse()
            .map_err(|e| CliError::validation(format!("Invalid bind address {host}:{port}: {e}")))
    }

    /// Execute the serve command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let addr = self.address(&config.server.host, config.server.port)?;
        let data_file = self.data.clone().or(config.paths.data_file);

        let filter = if self.verbose { "debug" } else { "info" };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CliError::io(format!("Failed to start async runtime: {e}")))?;
        runtime
            .block_on(web::run_server(data_file, addr))
            .map_err(|e| CliError::io(format!("Server error: {e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_prefers_arguments() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: None,
            data: None,
            verbose: false,
        };
        let addr = args.address("127.0.0.1", 3001).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_invalid_host_is_validation_error() {
        let args = ServeArgs {
            host: Some("not a host".to_string()),
            port: Some(80),
            data: None,
            verbose: false,
        };
        assert_eq!(args.address("127.0.0.1", 3001).unwrap_err().exit_code.code(), 1);
    }
}

//! Configuration management CLI commands.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Verb data file
    #[arg(long, value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Port for `verbdeck serve`
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Page size used by the flash cards (1-100)
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    server: ServerOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    data_file: Option<String>,
}

#[derive(Serialize, Debug)]
struct ServerOutput {
    host: String,
    port: u16,
    page_size: usize,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    initial_reveal: usize,
    reveal_step: usize,
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.data_file.is_none()
            && self.port.is_none()
            && self.page_size.is_none()
            && self.theme.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data-file, --port, --page-size, or --theme",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(path) = &self.data_file {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "Verb data file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.data_file = Some(path.clone());
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }

        if let Some(page_size) = self.page_size {
            config.server.page_size = page_size;
        }

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = theme_str
                .parse::<ThemeMode>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        config_file: Config::config_file_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
        paths: PathsOutput {
            data_file: config
                .paths
                .data_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        server: ServerOutput {
            host: config.server.host.clone(),
            port: config.server.port,
            page_size: config.server.page_size,
        },
        ui: UiOutput {
            initial_reveal: config.ui.initial_reveal,
            reveal_step: config.ui.reveal_step,
            theme: config.ui.theme_mode.as_str().to_string(),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Verbdeck Configuration");
    println!("======================");
    println!();

    println!("Paths:");
    if let Some(data_file) = &config.paths.data_file {
        println!("  Data File: {}", data_file.display());
    } else {
        println!("  Data File: (bundled catalog)");
    }
    println!();

    println!("Server:");
    println!("  Address: {}", config.server.base_url());
    println!("  Page Size: {}", config.server.page_size);
    println!();

    println!("UI:");
    println!("  Initial Rows: {}", config.ui.initial_reveal);
    println!("  Reveal Step: {}", config.ui.reveal_step);
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    println!();
}

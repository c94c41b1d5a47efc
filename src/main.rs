//! Verbdeck - English verb tables and flash cards in the terminal
//!
//! Running `verbdeck` without a subcommand opens the verb table. The
//! subcommands give headless, scriptable access to the same data.

use clap::{Args, Parser, Subcommand};

use verbdeck::cli::{CliError, CliResult, ConfigArgs, ListArgs, StatusArgs};
use verbdeck::constants::APP_BINARY_NAME;

/// Verbdeck - English verb tables and flash cards in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the flash-card carousel
    Cards(CardsArgs),
    /// Print verbs matching a search and filters
    List(ListArgs),
    /// Inspect or change learning status
    Status(StatusArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// Serve the paged verb API over HTTP
    #[cfg(feature = "web")]
    Serve(verbdeck::cli::ServeArgs),
}

/// Open the flash-card carousel
#[derive(Args, Debug)]
struct CardsArgs {
    /// Fetch cards from a running `verbdeck serve` (e.g. http://127.0.0.1:3001)
    /// instead of the local catalog
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

#[cfg(feature = "ratatui")]
fn run_tui(view: verbdeck::tui::View, server: Option<&str>) -> CliResult<()> {
    let config = verbdeck::cli::common::load_config()?;
    verbdeck::tui::launch(&config, view, server).map_err(|e| CliError::io(format!("{e:#}")))
}

#[cfg(not(feature = "ratatui"))]
fn run_tui_unavailable() -> CliResult<()> {
    Err(CliError::validation(format!(
        "This build has no terminal UI. Run `{APP_BINARY_NAME} --help` for the available commands"
    )))
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        #[cfg(feature = "ratatui")]
        None => run_tui(verbdeck::tui::View::Table, None),
        #[cfg(feature = "ratatui")]
        Some(Command::Cards(args)) => run_tui(verbdeck::tui::View::Cards, args.server.as_deref()),
        #[cfg(not(feature = "ratatui"))]
        None | Some(Command::Cards(_)) => run_tui_unavailable(),
        Some(Command::List(args)) => args.execute(),
        Some(Command::Status(args)) => args.execute(),
        Some(Command::Config(args)) => args.execute(),
        #[cfg(feature = "web")]
        Some(Command::Serve(args)) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("For more options, run:");
        eprintln!("  {APP_BINARY_NAME} --help");
        std::process::exit(e.exit_code.code());
    }
}

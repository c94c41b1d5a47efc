//! Learning status commands.

use crate::cli::common::{load_catalog, open_ledger, CliError, CliResult};
use crate::models::Status;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Inspect or change learning status
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(subcommand)]
    command: StatusCommand,
}

#[derive(Subcommand, Debug)]
enum StatusCommand {
    /// Show recorded statuses and totals
    Show(StatusShowArgs),
    /// Set the status of one verb
    Set(StatusSetArgs),
    /// Forget every recorded status
    Reset,
}

/// Show recorded statuses
#[derive(Args, Debug)]
pub struct StatusShowArgs {
    /// Output as JSON (the stored verb → status map)
    #[arg(long)]
    json: bool,

    /// Verb data file used for the totals (overrides `paths.data_file`)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,
}

/// Set the status of one verb
#[derive(Args, Debug)]
pub struct StatusSetArgs {
    /// Base form of the verb (e.g. "go")
    verb: String,

    /// New status: unknown, learning or learned
    status: String,

    /// Verb data file the verb must belong to (overrides `paths.data_file`)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,
}

impl StatusArgs {
    /// Execute status subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            StatusCommand::Show(args) => args.execute(),
            StatusCommand::Set(args) => args.execute(),
            StatusCommand::Reset => execute_reset(),
        }
    }
}

impl StatusShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let ledger = open_ledger()?;

        if self.json {
            let json = serde_json::to_string_pretty(ledger.entries())
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        let catalog = load_catalog(self.data.as_deref())?;
        let counts = ledger.counts(catalog.records().iter().map(|r| r.verb.as_str()));

        println!("Learning progress");
        println!("=================");
        for status in Status::all() {
            println!("  {:<9} {}", status.display_name(), counts.get(*status));
        }
        println!("  {:<9} {}", "Total", counts.total());

        if !ledger.entries().is_empty() {
            println!();
            for (verb, status) in ledger.entries() {
                println!("  {verb:<12} {status}");
            }
        }

        Ok(())
    }
}

impl StatusSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let status: Status = self
            .status
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;

        let catalog = load_catalog(self.data.as_deref())?;
        if catalog.get(&self.verb).is_none() {
            return Err(CliError::validation(format!(
                "Unknown verb '{}'. Run `verbdeck list --search {}` to find it",
                self.verb, self.verb
            )));
        }

        let mut ledger = open_ledger()?;
        ledger
            .try_set_status(&self.verb, status)
            .map_err(|e| CliError::io(format!("Failed to save status: {e:#}")))?;

        println!("{} → {}", self.verb, status.as_str());
        Ok(())
    }
}

fn execute_reset() -> CliResult<()> {
    let mut ledger = open_ledger()?;
    ledger
        .try_reset()
        .map_err(|e| CliError::io(format!("Failed to save status: {e:#}")))?;
    println!("All verb statuses reset.");
    Ok(())
}

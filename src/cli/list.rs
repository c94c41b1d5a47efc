//! Filtered catalog listing.

use crate::cli::common::{load_catalog, open_ledger, CliError, CliResult};
use crate::models::{Status, VerbRecord, VerbType, MISSING_MEANING_PLACEHOLDER};
use crate::services::{filter_verbs, FilterState};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Print verbs matching a search and filters
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against every verb form
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only verbs of this type (regular, irregular); repeatable
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Only verbs with this status (unknown, learning, learned); repeatable
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<String>,

    /// Verb data file (overrides `paths.data_file`)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListedVerb<'a> {
    #[serde(flatten)]
    record: &'a VerbRecord,
    status: Status,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    verbs: Vec<ListedVerb<'a>>,
    total: usize,
    matched: usize,
}

impl ListArgs {
    /// Builds the filter described by the arguments.
    pub fn filter_state(&self) -> CliResult<FilterState> {
        let types = self
            .types
            .iter()
            .map(|t| t.parse::<VerbType>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CliError::validation(e.to_string()))?;
        let statuses = self
            .statuses
            .iter()
            .map(|s| s.parse::<Status>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CliError::validation(e.to_string()))?;

        Ok(FilterState::new()
            .with_query(self.search.clone().unwrap_or_default())
            .with_types(types)
            .with_statuses(statuses))
    }

    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let filter = self.filter_state()?;
        let catalog = load_catalog(self.data.as_deref())?;
        let ledger = open_ledger()?;

        let matched = filter_verbs(catalog.records(), &filter, |v| ledger.status_of(v));

        if self.json {
            let output = ListOutput {
                matched: matched.len(),
                total: catalog.len(),
                verbs: matched
                    .iter()
                    .map(|record| ListedVerb {
                        record,
                        status: ledger.status_of(&record.verb),
                    })
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        if matched.is_empty() {
            println!("No verbs match.");
            return Ok(());
        }

        println!(
            "{:<12} {:<14} {:<16} {:<14} {:<10} {:<9} Meaning",
            "Verb", "Past simple", "Past participle", "Future", "Type", "Status"
        );
        for record in &matched {
            println!(
                "{:<12} {:<14} {:<16} {:<14} {:<10} {:<9} {}",
                record.verb,
                record.past_simple,
                record.past_participle,
                record.future,
                record.verb_type,
                ledger.status_of(&record.verb),
                record.meaning_or(MISSING_MEANING_PLACEHOLDER)
            );
        }
        println!();
        println!("{} of {} verbs", matched.len(), catalog.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            search: None,
            types: Vec::new(),
            statuses: Vec::new(),
            data: None,
            json: false,
        }
    }

    #[test]
    fn test_filter_state_from_args() {
        let mut list = args();
        list.search = Some("went".to_string());
        list.types = vec!["Irregular".to_string()];
        list.statuses = vec!["learning".to_string(), "learned".to_string()];

        let filter = list.filter_state().unwrap();
        assert_eq!(filter.query, "went");
        assert!(filter.type_filters.contains(&VerbType::Irregular));
        assert_eq!(filter.status_filters.len(), 2);
    }

    #[test]
    fn test_invalid_type_is_validation_error() {
        let mut list = args();
        list.types = vec!["modal".to_string()];
        let err = list.filter_state().unwrap_err();
        assert_eq!(err.exit_code.code(), 1);
    }
}

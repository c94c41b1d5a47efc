//! Verb catalog loading and validation.
//!
//! The catalog is read wholesale from a JSON file shaped like
//! `{ "verbs": [ ... ] }`. When no file is configured, the copy of
//! `data/verbs.json` embedded at compile time is used instead.

use rust_embed::Embed;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{VerbPage, VerbRecord};

/// File name of the bundled catalog inside the embedded data folder.
const BUNDLED_CATALOG: &str = "verbs.json";

/// Data files embedded into the binary.
#[derive(Embed)]
#[folder = "data"]
#[include = "*.json"]
struct BundledData;

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The backing file could not be read
    #[error("Failed to read verb catalog {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid catalog JSON
    #[error("Failed to parse verb catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record has an empty base form
    #[error("Verb record #{index} has an empty base form")]
    EmptyVerb {
        /// Position of the record in the file
        index: usize,
    },

    /// Two records share a base form
    #[error("Duplicate verb '{0}' in catalog")]
    DuplicateVerb(String),

    /// The bundled catalog is missing from the binary
    #[error("Bundled verb catalog is not available")]
    BundledMissing,
}

/// On-disk shape of the catalog file.
///
/// `verbs` stays untyped until it is known to be an array; anything else
/// (null, an object, a number) reads as no verbs.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    verbs: serde_json::Value,
}

/// Immutable, ordered list of verbs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<VerbRecord>,
}

impl Catalog {
    /// Builds a catalog from records, enforcing non-empty unique base forms.
    pub fn from_records(records: Vec<VerbRecord>) -> Result<Self, CatalogError> {
        validate_records(&records)?;
        Ok(Self { records })
    }

    /// Parses catalog JSON.
    ///
    /// A document whose `verbs` is missing or not an array is an empty
    /// catalog. Records inside the array must be well formed.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let records = match file.verbs {
            verbs @ serde_json::Value::Array(_) => serde_json::from_value(verbs)?,
            _ => Vec::new(),
        };
        Self::from_records(records)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Loads the catalog embedded in the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let file = BundledData::get(BUNDLED_CATALOG).ok_or(CatalogError::BundledMissing)?;
        let content = String::from_utf8_lossy(file.data.as_ref());
        Self::from_json(&content)
    }

    /// Loads `path` if given, otherwise the bundled catalog.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[VerbRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by its exact base form.
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<&VerbRecord> {
        self.records.iter().find(|r| r.verb == verb)
    }

    /// Returns one page of the catalog.
    #[must_use]
    pub fn page(&self, offset: usize, limit: usize) -> VerbPage {
        VerbPage::slice(&self.records, offset, limit)
    }
}

fn validate_records(records: &[VerbRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.verb.trim().is_empty() {
            return Err(CatalogError::EmptyVerb { index });
        }
        if !seen.insert(record.verb.as_str()) {
            return Err(CatalogError::DuplicateVerb(record.verb.clone()));
        }
    }
    Ok(())
}

//! Verb records as they appear in the catalog data file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown in tables when a verb has no meaning.
pub const MISSING_MEANING_PLACEHOLDER: &str = "—";

/// Conjugation class of a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbType {
    /// Past forms built with the -ed suffix
    Regular,
    /// Past forms that must be memorized
    Irregular,
}

impl VerbType {
    /// Returns all verb types in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Irregular, Self::Regular]
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Irregular => "Irregular",
        }
    }

    /// Returns the serialized identifier (`regular` / `irregular`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Irregular => "irregular",
        }
    }
}

impl fmt::Display for VerbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for VerbType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "irregular" => Ok(Self::Irregular),
            other => anyhow::bail!("Unknown verb type '{other}' (expected regular or irregular)"),
        }
    }
}

/// A single verb with its tenses.
///
/// Records are created once when the catalog loads and never mutated
/// afterwards. The base form (`verb`) is the identifier used by the
/// status ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRecord {
    /// Base form, unique within the catalog (e.g., "go")
    pub verb: String,
    /// Simple past (e.g., "went")
    pub past_simple: String,
    /// Past participle (e.g., "gone")
    pub past_participle: String,
    /// Future form (e.g., "will go")
    pub future: String,
    /// Regular or irregular
    #[serde(rename = "type")]
    pub verb_type: VerbType,
    /// Optional translation or gloss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl VerbRecord {
    /// Creates a record without a meaning.
    #[must_use]
    pub fn new(
        verb: impl Into<String>,
        past_simple: impl Into<String>,
        past_participle: impl Into<String>,
        future: impl Into<String>,
        verb_type: VerbType,
    ) -> Self {
        Self {
            verb: verb.into(),
            past_simple: past_simple.into(),
            past_participle: past_participle.into(),
            future: future.into(),
            verb_type,
            meaning: None,
        }
    }

    /// Sets the meaning.
    #[must_use]
    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    /// The four searchable forms, in table order.
    #[must_use]
    pub fn forms(&self) -> [&str; 4] {
        [
            &self.verb,
            &self.past_simple,
            &self.past_participle,
            &self.future,
        ]
    }

    /// Returns the meaning, or `placeholder` when absent or blank.
    #[must_use]
    pub fn meaning_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.meaning.as_deref() {
            Some(m) if !m.trim().is_empty() => m,
            _ => placeholder,
        }
    }

    /// Checks whether any form contains an already-normalized query.
    ///
    /// `needle` must be trimmed and lowercased by the caller.
    #[must_use]
    pub fn matches_normalized(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.forms()
            .iter()
            .any(|form| form.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go() -> VerbRecord {
        VerbRecord::new("go", "went", "gone", "will go", VerbType::Irregular).with_meaning("ir")
    }

    #[test]
    fn test_deserialize_data_file_shape() {
        let json = r#"{
            "verb": "walk",
            "past_simple": "walked",
            "past_participle": "walked",
            "future": "will walk",
            "type": "regular"
        }"#;
        let record: VerbRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.verb, "walk");
        assert_eq!(record.verb_type, VerbType::Regular);
        assert_eq!(record.meaning, None);
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let value = serde_json::to_value(go()).unwrap();
        assert_eq!(value["type"], "irregular");
        assert_eq!(value["past_simple"], "went");
        assert_eq!(value["meaning"], "ir");
    }

    #[test]
    fn test_meaning_placeholder() {
        let mut record = go();
        assert_eq!(record.meaning_or(MISSING_MEANING_PLACEHOLDER), "ir");
        record.meaning = None;
        assert_eq!(record.meaning_or(MISSING_MEANING_PLACEHOLDER), "—");
        record.meaning = Some("   ".to_string());
        assert_eq!(record.meaning_or("none"), "none");
    }

    #[test]
    fn test_matches_any_form() {
        let record = go();
        assert!(record.matches_normalized("went"));
        assert!(record.matches_normalized("gon"));
        assert!(record.matches_normalized("will go"));
        assert!(!record.matches_normalized("ir"));
        assert!(record.matches_normalized(""));
    }

    #[test]
    fn test_verb_type_from_str() {
        assert_eq!("Regular".parse::<VerbType>().unwrap(), VerbType::Regular);
        assert_eq!(" irregular ".parse::<VerbType>().unwrap(), VerbType::Irregular);
        assert!("weird".parse::<VerbType>().is_err());
    }
}

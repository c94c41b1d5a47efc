//! Learning status a user assigns to a verb.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported learning progress on one verb.
///
/// A verb with no recorded status is [`Status::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not studied yet
    #[default]
    Unknown,
    /// Currently being practiced
    Learning,
    /// Memorized
    Learned,
}

impl Status {
    /// Returns all statuses in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Unknown, Self::Learning, Self::Learned]
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Learning => "Learning",
            Self::Learned => "Learned",
        }
    }

    /// Returns the serialized identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Learning => "learning",
            Self::Learned => "learned",
        }
    }

    /// Next status in the unknown → learning → learned → unknown cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Unknown => Self::Learning,
            Self::Learning => Self::Learned,
            Self::Learned => Self::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "learning" => Ok(Self::Learning),
            "learned" => Ok(Self::Learned),
            other => anyhow::bail!(
                "Unknown status '{other}' (expected unknown, learning, or learned)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Status::default(), Status::Unknown);
    }

    #[test]
    fn test_cycle_visits_every_status() {
        let mut status = Status::Unknown;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(status);
            status = status.next();
        }
        assert_eq!(status, Status::Unknown);
        assert_eq!(seen, Status::all());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Learned).unwrap(), "\"learned\"");
        let parsed: Status = serde_json::from_str("\"learning\"").unwrap();
        assert_eq!(parsed, Status::Learning);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("LEARNED".parse::<Status>().unwrap(), Status::Learned);
        assert!("done".parse::<Status>().is_err());
    }
}

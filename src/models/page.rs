//! Wire format of one page of the verb catalog.

use serde::{Deserialize, Serialize};

use super::VerbRecord;

/// A slice of the catalog returned by `GET /api/verbs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPage {
    /// Records in catalog order
    pub verbs: Vec<VerbRecord>,
    /// Size of the whole catalog
    pub total: usize,
    /// Offset this page starts at
    pub offset: usize,
    /// Page size that was applied
    pub limit: usize,
}

impl VerbPage {
    /// Slices `records` starting at `offset`, taking at most `limit` items.
    ///
    /// An offset past the end produces an empty page, not an error.
    #[must_use]
    pub fn slice(records: &[VerbRecord], offset: usize, limit: usize) -> Self {
        let start = offset.min(records.len());
        let end = start.saturating_add(limit).min(records.len());
        Self {
            verbs: records[start..end].to_vec(),
            total: records.len(),
            offset,
            limit,
        }
    }
}

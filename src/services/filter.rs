//! Search and filter over the verb catalog.
//!
//! Filtering is a pure function of the catalog, the current
//! [`FilterState`], and the status lookup. It never reorders records.

use std::collections::BTreeSet;

use crate::models::{Status, VerbRecord, VerbType};

/// Current search text plus type and status restrictions.
///
/// An empty set for a dimension means "no restriction" on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    /// Free-text search over all verb forms
    pub query: String,
    /// Allowed verb types (empty = all)
    pub type_filters: BTreeSet<VerbType>,
    /// Allowed statuses (empty = all)
    pub status_filters: BTreeSet<Status>,
}

impl FilterState {
    /// Creates an unrestricted filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Builder-style setter for the type filters.
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = VerbType>) -> Self {
        self.type_filters = types.into_iter().collect();
        self
    }

    /// Builder-style setter for the status filters.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.status_filters = statuses.into_iter().collect();
        self
    }

    /// Replaces the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Adds `verb_type` to the filter, or removes it if already present.
    pub fn toggle_type(&mut self, verb_type: VerbType) {
        if !self.type_filters.remove(&verb_type) {
            self.type_filters.insert(verb_type);
        }
    }

    /// Adds `status` to the filter, or removes it if already present.
    pub fn toggle_status(&mut self, status: Status) {
        if !self.status_filters.remove(&status) {
            self.status_filters.insert(status);
        }
    }

    /// Clears the query and both filter sets.
    pub fn clear(&mut self) {
        self.query.clear();
        self.type_filters.clear();
        self.status_filters.clear();
    }

    /// True when no dimension restricts the result.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.normalized_query().is_empty()
            && self.type_filters.is_empty()
            && self.status_filters.is_empty()
    }

    /// Query trimmed and lowercased, as used for matching.
    #[must_use]
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Tests a single record against this filter.
    ///
    /// `needle` is [`Self::normalized_query`], hoisted out by callers that
    /// test many records.
    fn accepts(&self, record: &VerbRecord, status: Status, needle: &str) -> bool {
        if !self.type_filters.is_empty() && !self.type_filters.contains(&record.verb_type) {
            return false;
        }
        if !self.status_filters.is_empty() && !self.status_filters.contains(&status) {
            return false;
        }
        record.matches_normalized(needle)
    }
}

/// Returns the records accepted by `filter`, in catalog order.
///
/// `status_of` maps a verb's base form to its learning status.
pub fn filter_verbs<'a, F>(
    records: &'a [VerbRecord],
    filter: &FilterState,
    status_of: F,
) -> Vec<&'a VerbRecord>
where
    F: Fn(&str) -> Status,
{
    let needle = filter.normalized_query();
    records
        .iter()
        .filter(|record| filter.accepts(record, status_of(&record.verb), &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn catalog() -> Vec<VerbRecord> {
        vec![
            VerbRecord::new("be", "was/were", "been", "will be", VerbType::Irregular),
            VerbRecord::new("go", "went", "gone", "will go", VerbType::Irregular),
            VerbRecord::new("walk", "walked", "walked", "will walk", VerbType::Regular),
            VerbRecord::new("want", "wanted", "wanted", "will want", VerbType::Regular),
            VerbRecord::new("write", "wrote", "written", "will write", VerbType::Irregular),
        ]
    }

    fn statuses() -> HashMap<&'static str, Status> {
        HashMap::from([("go", Status::Learned), ("walk", Status::Learning)])
    }

    fn names(records: &[&VerbRecord]) -> Vec<String> {
        records.iter().map(|r| r.verb.clone()).collect()
    }

    fn run(filter: &FilterState) -> Vec<String> {
        let all = catalog();
        let map = statuses();
        names(&filter_verbs(&all, filter, |v| {
            map.get(v).copied().unwrap_or_default()
        }))
    }

    #[test]
    fn test_unrestricted_returns_everything_in_order() {
        assert_eq!(run(&FilterState::new()), vec!["be", "go", "walk", "want", "write"]);
    }

    #[test]
    fn test_search_matches_past_simple() {
        assert_eq!(run(&FilterState::new().with_query("went")), vec!["go"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        assert_eq!(run(&FilterState::new().with_query("  WRITTEN ")), vec!["write"]);
    }

    #[test]
    fn test_search_covers_future_form() {
        assert_eq!(run(&FilterState::new().with_query("will wa")), vec!["walk", "want"]);
    }

    #[test]
    fn test_whitespace_query_is_no_restriction() {
        assert_eq!(run(&FilterState::new().with_query("   ")).len(), 5);
        assert!(FilterState::new().with_query("  ").is_unrestricted());
    }

    #[test]
    fn test_type_filter() {
        let filter = FilterState::new().with_types([VerbType::Regular]);
        assert_eq!(run(&filter), vec!["walk", "want"]);

        let both = FilterState::new().with_types([VerbType::Regular, VerbType::Irregular]);
        assert_eq!(run(&both).len(), 5);
    }

    #[test]
    fn test_status_filter_treats_missing_as_unknown() {
        let unknown = FilterState::new().with_statuses([Status::Unknown]);
        assert_eq!(run(&unknown), vec!["be", "want", "write"]);

        let progressing = FilterState::new().with_statuses([Status::Learning, Status::Learned]);
        assert_eq!(run(&progressing), vec!["go", "walk"]);
    }

    #[test]
    fn test_dimensions_combine() {
        let filter = FilterState::new()
            .with_query("w")
            .with_types([VerbType::Irregular])
            .with_statuses([Status::Unknown]);
        // "be" matches via "was/were", "write" via its forms; "go" is learned
        assert_eq!(run(&filter), vec!["be", "write"]);
    }

    #[test]
    fn test_empty_sets_equal_query_only() {
        let all = catalog();
        let map = statuses();
        for query in ["", "w", "went", "will", "zzz"] {
            let filter = FilterState::new().with_query(query);
            let filtered = names(&filter_verbs(&all, &filter, |v| {
                map.get(v).copied().unwrap_or_default()
            }));
            let needle = query.trim().to_lowercase();
            let expected: Vec<String> = all
                .iter()
                .filter(|r| r.matches_normalized(&needle))
                .map(|r| r.verb.clone())
                .collect();
            assert_eq!(filtered, expected, "query {query:?}");
        }
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut filter = FilterState::new();
        filter.toggle_type(VerbType::Regular);
        filter.toggle_status(Status::Learned);
        filter.set_query("go");
        assert!(filter.type_filters.contains(&VerbType::Regular));
        assert!(!filter.is_unrestricted());

        filter.toggle_type(VerbType::Regular);
        assert!(filter.type_filters.is_empty());

        filter.clear();
        assert!(filter.is_unrestricted());
        assert!(filter.query.is_empty());
    }
}

//! Per-verb learning status with best-effort persistence.
//!
//! The in-memory map is the source of truth for the running session.
//! Every change writes the full map to the key/value store; a failed
//! write is logged and otherwise ignored.

use std::collections::BTreeMap;

use crate::constants::STATUS_STORAGE_KEY;
use crate::models::Status;
use crate::store::KeyValueStore;

/// Tally of verbs per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Verbs with no recorded progress
    pub unknown: usize,
    /// Verbs being practiced
    pub learning: usize,
    /// Verbs marked learned
    pub learned: usize,
}

impl StatusCounts {
    /// Adds one verb with `status` to the tally.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Unknown => self.unknown += 1,
            Status::Learning => self.learning += 1,
            Status::Learned => self.learned += 1,
        }
    }

    /// Total verbs counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.unknown + self.learning + self.learned
    }

    /// Count for a single status.
    #[must_use]
    pub const fn get(&self, status: Status) -> usize {
        match status {
            Status::Unknown => self.unknown,
            Status::Learning => self.learning,
            Status::Learned => self.learned,
        }
    }
}

/// Mapping from verb to learning status, backed by a key/value store.
#[derive(Debug)]
pub struct StatusLedger<S: KeyValueStore> {
    entries: BTreeMap<String, Status>,
    store: S,
}

impl<S: KeyValueStore> StatusLedger<S> {
    /// Loads the persisted map from `store`.
    ///
    /// A missing or malformed entry yields an empty ledger; this never fails.
    pub fn load(store: S) -> Self {
        let entries = store
            .get(STATUS_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(map) => Some(map),
                Err(e) => {
                    tracing::debug!("Discarding malformed verb status map: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self { entries, store }
    }

    /// Status of `verb`; verbs without an entry are [`Status::Unknown`].
    #[must_use]
    pub fn status_of(&self, verb: &str) -> Status {
        self.entries.get(verb).copied().unwrap_or_default()
    }

    /// Records `status` for `verb` and persists the whole map.
    pub fn set_status(&mut self, verb: &str, status: Status) {
        self.entries.insert(verb.to_string(), status);
        self.persist();
    }

    /// Advances `verb` to the next status in the cycle and returns it.
    pub fn cycle_status(&mut self, verb: &str) -> Status {
        let next = self.status_of(verb).next();
        self.set_status(verb, next);
        next
    }

    /// Forgets every recorded status and persists the empty map.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Recorded entries, sorted by verb.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, Status> {
        &self.entries
    }

    /// Tallies statuses over `verbs`.
    pub fn counts<'a>(&self, verbs: impl IntoIterator<Item = &'a str>) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for verb in verbs {
            counts.record(self.status_of(verb));
        }
        counts
    }

    /// Underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store (used for other preferences).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Records `status` for `verb` and reports a failed write to the caller.
    ///
    /// The in-memory entry is updated either way.
    pub fn try_set_status(&mut self, verb: &str, status: Status) -> anyhow::Result<()> {
        self.entries.insert(verb.to_string(), status);
        self.flush()
    }

    /// Like [`Self::reset`], but reports a failed write to the caller.
    pub fn try_reset(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.flush()
    }

    /// Writes the full map to the store.
    pub fn flush(&mut self) -> anyhow::Result<()> {
        let snapshot = serde_json::to_string(&self.entries)?;
        self.store.set(STATUS_STORAGE_KEY, &snapshot)
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to persist verb status map: {:#}", e);
        }
    }
}

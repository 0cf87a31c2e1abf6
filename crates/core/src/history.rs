//! Append-only audit trail of scorecard status changes.

use std::slice;

use serde::{Deserialize, Serialize};

use crate::status::ScorecardStatus;
use crate::types::Timestamp;

/// One recorded status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Status the document moved into.
    pub status: ScorecardStatus,
    pub timestamp: Timestamp,
    /// Display name of the actor who made the change.
    pub actor: String,
    /// Reviewer comment, recorded for rejections only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Ordered history attached to each scorecard.
///
/// Entries can only be appended from inside this crate; callers get a
/// read-only, restartable view through [`History::iter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<HistoryEntry>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order. The iterator is `Clone`, so the same
    /// sequence can be walked any number of times.
    pub fn iter(&self) -> slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

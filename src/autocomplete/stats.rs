//! Index statistics and load reports.

use serde::{Deserialize, Serialize};

/// Snapshot statistics returned by `AutocompleteIndex::stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Distinct names in the trie, including derived variants.
    pub total_institutions: usize,
    /// Whether the index has been built.
    pub initialized: bool,
    /// Distinct tokens in the approximate dictionary.
    pub dictionary_terms: usize,
}

/// What happened while loading records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Records handed to the index.
    pub records_seen: usize,
    /// Records indexed under their cleaned name.
    pub records_indexed: usize,
    /// Records whose cleaned name was already seen in the batch.
    pub duplicates: usize,
    /// Records with nothing left after cleaning.
    pub records_skipped: usize,
    /// Records a source could not parse.
    pub records_malformed: usize,
    /// Newly indexed prefix-stripped variants.
    pub variants_indexed: usize,
    /// Sources read successfully.
    pub sources_loaded: usize,
    /// Sources that failed as a whole.
    pub sources_failed: usize,
    /// Distinct tokens in the dictionary after the load.
    pub dictionary_terms: usize,
}

impl LoadReport {
    /// Whether every record and source was usable.
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0 && self.records_malformed == 0 && self.sources_failed == 0
    }
}

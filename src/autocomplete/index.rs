//! The autocomplete facade.
//!
//! [`AutocompleteIndex`] owns the name trie and the phrase corrector behind a
//! shared, immutable [`IndexSnapshot`]. Queries grab the current snapshot and
//! run without holding any lock; rebuilds and incremental additions prepare a
//! new snapshot on the side and swap it in, so readers never see a half-built
//! index.

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::autocomplete::config::AutocompleteConfig;
use crate::autocomplete::stats::{IndexStats, LoadReport};
use crate::error::Result;
use crate::institution::{Category, InstitutionRecord};
use crate::loader::{RecordSource, load_sources};
use crate::normalize::NameNormalizer;
use crate::spelling::corrector::{CorrectedPhrase, PhraseCorrector};
use crate::spelling::dictionary::ApproximateDictionary;
use crate::trie::{Trie, TrieSuggestion};

/// An immutable, query-ready view of the index.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    trie: Trie,
    corrector: PhraseCorrector,
    initialized: bool,
}

impl IndexSnapshot {
    fn empty(config: &AutocompleteConfig) -> Self {
        IndexSnapshot {
            trie: Trie::with_display_limit(config.display_max_chars),
            corrector: PhraseCorrector::with_config(empty_dictionary(config), config.corrector_config()),
            initialized: false,
        }
    }

    /// The name trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// The phrase corrector and its dictionary.
    pub fn corrector(&self) -> &PhraseCorrector {
        &self.corrector
    }

    /// Whether the snapshot has been built.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Prefix suggestions, falling back to corrections when nothing matches.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<TrieSuggestion> {
        if !self.initialized || prefix.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        let suggestions = self.trie.suggestions(prefix, limit);
        if !suggestions.is_empty() {
            return suggestions;
        }

        debug!("no prefix match for '{prefix}', trying correction");
        let mut seen = AHashSet::new();
        self.corrector
            .correct(prefix, &self.trie, limit)
            .into_iter()
            .flat_map(|corrected| corrected.matched_institutions)
            .filter(|suggestion| seen.insert(suggestion.full_name.clone()))
            .take(limit)
            .collect()
    }

    /// Validated "did you mean" corrections for `phrase`.
    pub fn correct(&self, phrase: &str, limit: usize) -> Vec<CorrectedPhrase> {
        if !self.initialized || phrase.trim().is_empty() {
            return Vec::new();
        }
        self.corrector.correct(phrase, &self.trie, limit)
    }

    /// Current statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_institutions: self.trie.word_count(),
            initialized: self.initialized,
            dictionary_terms: self.corrector.dictionary().len(),
        }
    }
}

/// Institution name index with autocomplete and did-you-mean fallback.
///
/// Create one at start-up and share it by `Arc`:
///
/// ```
/// use onoma::autocomplete::AutocompleteIndex;
/// use onoma::institution::{Category, InstitutionRecord};
///
/// let index = AutocompleteIndex::new();
/// index
///     .initialize(vec![
///         InstitutionRecord::new("Harvard University", Category::Education).with_frequency(100),
///         InstitutionRecord::new("Harvard Medical School", Category::Education).with_frequency(50),
///     ])
///     .unwrap();
///
/// let names: Vec<String> = index
///     .suggest("harv", 5)
///     .into_iter()
///     .map(|s| s.full_name)
///     .collect();
/// assert_eq!(names, vec!["Harvard University", "Harvard Medical School"]);
/// ```
pub struct AutocompleteIndex {
    config: AutocompleteConfig,
    normalizer: NameNormalizer,
    snapshot: RwLock<Arc<IndexSnapshot>>,
    /// Serializes writers; readers never take it
    writer: Mutex<()>,
}

impl AutocompleteIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::build(AutocompleteConfig::default())
    }

    /// Create an empty index with a validated custom configuration.
    pub fn with_config(config: AutocompleteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AutocompleteConfig) -> Self {
        let snapshot = IndexSnapshot::empty(&config);
        AutocompleteIndex {
            normalizer: NameNormalizer::with_config(config.normalizer.clone()),
            config,
            snapshot: RwLock::new(Arc::new(snapshot)),
            writer: Mutex::new(()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// The current snapshot. It stays valid even if the index is rebuilt.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Replace the index contents with `records`.
    ///
    /// Records without an explicit frequency are weighted by position, the
    /// first of `n` records getting `n`. Names that are empty after cleaning
    /// are skipped and case-insensitive duplicates are ignored.
    pub fn initialize<I>(&self, records: I) -> Result<LoadReport>
    where
        I: IntoIterator<Item = InstitutionRecord>,
    {
        let _writer = self.writer.lock();
        let mut report = LoadReport::default();
        let snapshot = self.build_snapshot(records.into_iter().collect(), &mut report)?;
        self.publish(snapshot);

        info!(
            "indexed {} institutions ({} variants, {} duplicates, {} skipped)",
            report.records_indexed, report.variants_indexed, report.duplicates, report.records_skipped
        );
        Ok(report)
    }

    /// Replace the index contents with the records of several sources.
    ///
    /// Sources are read in parallel. A source that fails is logged and
    /// counted, and the index is built from the rest.
    pub fn initialize_from_sources(&self, sources: &[Box<dyn RecordSource>]) -> Result<LoadReport> {
        let _writer = self.writer.lock();
        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for outcome in load_sources(sources) {
            match outcome.result {
                Ok(batch) => {
                    report.sources_loaded += 1;
                    report.records_malformed += batch.malformed;
                    records.extend(batch.records);
                }
                Err(e) => {
                    warn!("skipping source {}: {}", outcome.name, e);
                    report.sources_failed += 1;
                }
            }
        }

        let snapshot = self.build_snapshot(records, &mut report)?;
        self.publish(snapshot);

        info!(
            "indexed {} institutions from {} sources ({} failed, {} malformed records)",
            report.records_indexed, report.sources_loaded, report.sources_failed, report.records_malformed
        );
        Ok(report)
    }

    /// Add one institution to the live index. Returns whether its name was new.
    pub fn add_institution(&self, record: InstitutionRecord) -> Result<bool> {
        let report = self.add_institutions(vec![record])?;
        Ok(report.records_indexed > 0)
    }

    /// Add institutions to the live index without rebuilding it.
    ///
    /// Names already indexed only have their frequency raised.
    pub fn add_institutions(&self, records: Vec<InstitutionRecord>) -> Result<LoadReport> {
        let _writer = self.writer.lock();
        let mut snapshot = IndexSnapshot::clone(&self.snapshot());
        let mut report = LoadReport::default();

        let IndexSnapshot { trie, corrector, .. } = &mut snapshot;
        self.index_records(records, trie, Some(corrector.dictionary_mut()), &mut report);
        snapshot.trie.verify()?;
        snapshot.initialized = true;
        report.dictionary_terms = snapshot.corrector.dictionary().len();

        self.publish(snapshot);
        Ok(report)
    }

    /// Prefix suggestions, falling back to corrections when nothing matches.
    ///
    /// Returns nothing for an empty prefix or before initialization.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<TrieSuggestion> {
        self.snapshot().suggest(prefix, limit)
    }

    /// Validated "did you mean" corrections for `phrase`.
    pub fn correct(&self, phrase: &str, limit: usize) -> Vec<CorrectedPhrase> {
        self.snapshot().correct(phrase, limit)
    }

    /// Current statistics.
    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats()
    }

    fn build_snapshot(
        &self,
        records: Vec<InstitutionRecord>,
        report: &mut LoadReport,
    ) -> Result<IndexSnapshot> {
        let mut trie = Trie::with_display_limit(self.config.display_max_chars);
        self.index_records(records, &mut trie, None, report);
        trie.verify()?;

        let dictionary = ApproximateDictionary::from_phrases(
            trie.entries()
                .into_iter()
                .map(|entry| (entry.word, entry.frequency)),
            self.config.max_edit_distance,
            self.config.prefix_length,
            self.config.min_dictionary_token_length,
        );
        report.dictionary_terms = dictionary.len();

        Ok(IndexSnapshot {
            trie,
            corrector: PhraseCorrector::with_config(dictionary, self.config.corrector_config()),
            initialized: true,
        })
    }

    /// Insert cleaned names and their variants into `trie`, keeping
    /// `dictionary` in step when one is given.
    fn index_records(
        &self,
        records: Vec<InstitutionRecord>,
        trie: &mut Trie,
        mut dictionary: Option<&mut ApproximateDictionary>,
        report: &mut LoadReport,
    ) {
        let total = records.len();
        let mut seen: AHashSet<String> = AHashSet::with_capacity(total);

        for (position, record) in records.into_iter().enumerate() {
            report.records_seen += 1;

            let name = self.normalizer.clean(&record.name);
            if name.is_empty() {
                report.records_skipped += 1;
                continue;
            }
            if !seen.insert(name.to_lowercase()) {
                report.duplicates += 1;
                continue;
            }

            let frequency = record.frequency.unwrap_or((total - position) as u64);
            let category = record.category;
            if insert_name(trie, dictionary.as_deref_mut(), &name, frequency, category) {
                report.records_indexed += 1;
            } else {
                // Already indexed, possibly as another record's variant
                report.duplicates += 1;
            }

            let variant_frequency = frequency.saturating_sub(1).max(1);
            for variant in self.normalizer.normalize_variants(&name, category) {
                let target = dictionary.as_deref_mut();
                if insert_name(trie, target, &variant, variant_frequency, category) {
                    report.variants_indexed += 1;
                }
            }
        }
    }

    fn publish(&self, snapshot: IndexSnapshot) {
        *self.snapshot.write() = Arc::new(snapshot);
    }
}

impl Default for AutocompleteIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert one name, returning whether it is new.
///
/// The dictionary receives whatever the trie frequency grew by, so it always
/// matches a dictionary rebuilt from the trie entries.
fn insert_name(
    trie: &mut Trie,
    dictionary: Option<&mut ApproximateDictionary>,
    name: &str,
    frequency: u64,
    category: Category,
) -> bool {
    let previous = trie.frequency(name);
    let is_new = trie.insert(name, frequency, category);

    if let Some(dictionary) = dictionary {
        let current = trie.frequency(name).unwrap_or(0);
        match previous {
            None => dictionary.add_phrase(name, current),
            Some(previous) if current > previous => {
                dictionary.add_phrase(name, current - previous)
            }
            Some(_) => {}
        }
    }

    is_new
}

fn empty_dictionary(config: &AutocompleteConfig) -> ApproximateDictionary {
    ApproximateDictionary::new(config.max_edit_distance, config.prefix_length)
        .with_min_token_length(config.min_dictionary_token_length)
}

//! Approximate token dictionary for bounded edit-distance lookup.
//!
//! Candidates are found through a symmetric-delete index: every term is
//! registered under all strings obtainable by deleting up to
//! `max_edit_distance` characters from its first `prefix_length` characters.
//! A query generates the same deletions of its own prefix, gathers the terms
//! stored under them and verifies each with the true Levenshtein distance, so
//! no candidate is ever returned beyond the requested bound.

use std::cmp::Ordering;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::spelling::levenshtein::LevenshteinMatcher;

/// Default maximum edit distance supported by the index.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;
/// Default number of leading characters used for the delete index.
pub const DEFAULT_PREFIX_LENGTH: usize = 7;
/// Tokens shorter than this are not indexed.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// How many candidates a lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// The single best candidate.
    Top,
    /// Every candidate at the smallest distance found.
    Closest,
    /// Every candidate within the bound.
    All,
}

/// A term and its aggregate frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Lower-case token.
    pub term: String,
    /// Summed frequency of all occurrences.
    pub frequency: u64,
}

/// A lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The dictionary term.
    pub term: String,
    /// Edit distance from the looked-up word.
    pub distance: usize,
    /// Frequency of the term.
    pub frequency: u64,
}

impl Candidate {
    /// Ranking order: distance ascending, frequency descending, term ascending.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.term.cmp(&other.term))
    }
}

/// Token-level nearest-neighbour dictionary.
#[derive(Debug, Clone)]
pub struct ApproximateDictionary {
    /// Term frequencies
    entries: AHashMap<String, u64>,
    /// Delete variant -> terms producing it
    deletes: AHashMap<String, Vec<String>>,
    max_edit_distance: usize,
    prefix_length: usize,
    min_token_length: usize,
    /// Longest indexed term, in characters
    max_term_length: usize,
}

impl ApproximateDictionary {
    /// Create an empty dictionary.
    ///
    /// `prefix_length` is clamped to be larger than `max_edit_distance`.
    pub fn new(max_edit_distance: usize, prefix_length: usize) -> Self {
        ApproximateDictionary {
            entries: AHashMap::new(),
            deletes: AHashMap::new(),
            max_edit_distance,
            prefix_length: prefix_length.max(max_edit_distance + 1),
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            max_term_length: 0,
        }
    }

    /// Set the minimum token length accepted by [`add_phrase`](Self::add_phrase).
    pub fn with_min_token_length(mut self, min_token_length: usize) -> Self {
        self.min_token_length = min_token_length;
        self
    }

    /// Build a dictionary from phrases and their frequencies.
    ///
    /// Each phrase is split on whitespace; every sufficiently long token
    /// receives the phrase frequency, summed over all occurrences.
    pub fn from_phrases<I, S>(
        phrases: I,
        max_edit_distance: usize,
        prefix_length: usize,
        min_token_length: usize,
    ) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut dictionary = ApproximateDictionary::new(max_edit_distance, prefix_length)
            .with_min_token_length(min_token_length);

        for (phrase, frequency) in phrases {
            dictionary.add_phrase(phrase.as_ref(), frequency);
        }

        dictionary
    }

    /// Add every token of `phrase` with the given frequency contribution.
    pub fn add_phrase(&mut self, phrase: &str, frequency: u64) {
        for token in phrase.split_whitespace() {
            if token.chars().count() >= self.min_token_length {
                self.add_entry(token, frequency);
            }
        }
    }

    /// Add a single term, summing with any existing frequency.
    pub fn add_entry(&mut self, term: &str, frequency: u64) {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return;
        }

        if let Some(existing) = self.entries.get_mut(&term) {
            *existing = existing.saturating_add(frequency);
            return;
        }

        let prefix: String = term.chars().take(self.prefix_length).collect();
        for variant in generate_deletes(&prefix, self.max_edit_distance) {
            self.deletes.entry(variant).or_default().push(term.clone());
        }

        self.max_term_length = self.max_term_length.max(term.chars().count());
        self.entries.insert(term, frequency);
    }

    /// Find terms within `max_edit_distance` of `word`.
    ///
    /// The requested distance is capped by the distance the index was built
    /// for. Results are ranked by [`Candidate::rank`].
    pub fn lookup(&self, word: &str, max_edit_distance: usize, verbosity: Verbosity) -> Vec<Candidate> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || self.entries.is_empty() {
            return Vec::new();
        }

        let max_distance = max_edit_distance.min(self.max_edit_distance);
        let word_len = word.chars().count();
        if word_len > self.max_term_length + max_distance {
            return Vec::new();
        }

        if let Some(&frequency) = self.entries.get(&word)
            && verbosity != Verbosity::All
        {
            return vec![Candidate {
                term: word,
                distance: 0,
                frequency,
            }];
        }

        let matcher = LevenshteinMatcher::new(word.as_str());
        let prefix: String = word.chars().take(self.prefix_length).collect();
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut candidates = Vec::new();

        for variant in generate_deletes(&prefix, max_distance) {
            let Some(terms) = self.deletes.get(&variant) else {
                continue;
            };

            for term in terms {
                if !seen.insert(term.as_str()) {
                    continue;
                }
                if let Some(distance) = matcher.distance_threshold(term, max_distance) {
                    candidates.push(Candidate {
                        term: term.clone(),
                        distance,
                        frequency: self.entries.get(term).copied().unwrap_or(0),
                    });
                }
            }
        }

        candidates.sort_by(Candidate::rank);

        match verbosity {
            Verbosity::Top => candidates.truncate(1),
            Verbosity::Closest => {
                if let Some(best) = candidates.first().map(|c| c.distance) {
                    candidates.retain(|c| c.distance == best);
                }
            }
            Verbosity::All => {}
        }

        candidates
    }

    /// Whether `word` is itself a dictionary term.
    pub fn contains_exact(&self, word: &str) -> bool {
        !self.lookup(word, 0, Verbosity::Top).is_empty()
    }

    /// Aggregate frequency of a term.
    pub fn frequency(&self, term: &str) -> Option<u64> {
        self.entries.get(&term.to_lowercase()).copied()
    }

    /// All terms, most frequent first.
    pub fn entries(&self) -> Vec<DictionaryEntry> {
        let mut entries: Vec<DictionaryEntry> = self
            .entries
            .iter()
            .map(|(term, &frequency)| DictionaryEntry {
                term: term.clone(),
                frequency,
            })
            .collect();
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.term.cmp(&b.term)));
        entries
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum edit distance supported by the index.
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Number of leading characters used for the delete index.
    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }
}

impl Default for ApproximateDictionary {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PREFIX_LENGTH)
    }
}

/// All strings reachable from `word` by deleting up to `max_distance` characters,
/// including `word` itself.
fn generate_deletes(word: &str, max_distance: usize) -> AHashSet<String> {
    let mut variants = AHashSet::new();
    variants.insert(word.to_string());

    let mut frontier = vec![word.to_string()];
    for _ in 0..max_distance {
        let mut next = Vec::new();
        for current in &frontier {
            let chars: Vec<char> = current.chars().collect();
            if chars.len() <= 1 {
                continue;
            }
            for skip in 0..chars.len() {
                let variant: String = chars
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &c)| c)
                    .collect();
                if variants.insert(variant.clone()) {
                    next.push(variant);
                }
            }
        }
        frontier = next;
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dictionary() -> ApproximateDictionary {
        ApproximateDictionary::from_phrases(
            [
                ("University of Stanford", 100),
                ("Harvard University", 90),
                ("Boston College", 40),
                ("Bank of America", 70),
                ("Universal Bank", 5),
            ],
            2,
            7,
            3,
        )
    }

    #[test]
    fn test_from_phrases_tokenizes_and_sums() {
        let dict = sample_dictionary();

        assert_eq!(dict.frequency("university"), Some(190));
        assert_eq!(dict.frequency("bank"), Some(75));
        assert_eq!(dict.frequency("stanford"), Some(100));
        // Short tokens are discarded
        assert_eq!(dict.frequency("of"), None);
        assert!(!dict.contains_exact("of"));
    }

    #[test]
    fn test_lookup_closest() {
        let dict = sample_dictionary();

        let candidates = dict.lookup("univrsity", 2, Verbosity::Closest);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].term, "university");
        assert_eq!(candidates[0].distance, 1);
        assert_eq!(candidates[0].frequency, 190);
    }

    #[test]
    fn test_lookup_exact_short_circuits() {
        let dict = sample_dictionary();

        let candidates = dict.lookup("Harvard", 2, Verbosity::Closest);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].term, "harvard");
        assert_eq!(candidates[0].distance, 0);
        assert!(dict.contains_exact("HARVARD"));
    }

    #[test]
    fn test_lookup_all_ranks_by_distance_then_frequency() {
        let mut dict = ApproximateDictionary::new(2, 7);
        dict.add_entry("mercy", 10);
        dict.add_entry("marcy", 30);
        dict.add_entry("percy", 30);
        dict.add_entry("merck", 5);

        let candidates = dict.lookup("mercy", 2, Verbosity::All);
        let terms: Vec<&str> = candidates.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["mercy", "marcy", "percy", "merck"]);
        assert_eq!(candidates[0].distance, 0);
        assert!(candidates[1..].iter().all(|c| c.distance == 1));
    }

    #[test]
    fn test_lookup_closest_tie_break_alphabetical() {
        let mut dict = ApproximateDictionary::new(2, 7);
        dict.add_entry("mary", 10);
        dict.add_entry("mark", 10);
        dict.add_entry("marx", 10);

        let candidates = dict.lookup("marz", 2, Verbosity::Closest);
        let terms: Vec<&str> = candidates.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["mark", "marx", "mary"]);

        let top = dict.lookup("marz", 2, Verbosity::Top);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].term, "mark");
    }

    #[test]
    fn test_lookup_respects_bound() {
        let dict = sample_dictionary();

        assert!(dict.lookup("unvrsty", 1, Verbosity::All).is_empty());
        assert!(dict.lookup("zzzzzz", 2, Verbosity::All).is_empty());
        assert!(dict.lookup("", 2, Verbosity::All).is_empty());
        // Requested distance is capped by the index distance
        assert!(dict.lookup("unvrsty", 5, Verbosity::All).is_empty());

        for candidate in dict.lookup("bnak", 2, Verbosity::All) {
            assert!(candidate.distance <= 2);
        }
    }

    #[test]
    fn test_lookup_long_words_beyond_prefix() {
        let mut dict = ApproximateDictionary::new(2, 4);
        dict.add_entry("massachusetts", 10);

        let candidates = dict.lookup("massachusets", 2, Verbosity::Closest);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].term, "massachusetts");
        assert_eq!(candidates[0].distance, 1);

        let candidates = dict.lookup("masachusetts", 2, Verbosity::Closest);
        assert_eq!(candidates[0].term, "massachusetts");
    }

    #[test]
    fn test_prefix_length_clamped() {
        let dict = ApproximateDictionary::new(2, 1);
        assert_eq!(dict.prefix_length(), 3);
        assert_eq!(dict.max_edit_distance(), 2);
    }

    #[test]
    fn test_entries_sorted() {
        let dict = sample_dictionary();
        let entries = dict.entries();

        assert_eq!(entries.len(), dict.len());
        assert_eq!(entries[0].term, "university");
        assert!(entries.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn test_generate_deletes() {
        let deletes = generate_deletes("abc", 1);
        assert_eq!(deletes.len(), 4);
        assert!(deletes.contains("abc"));
        assert!(deletes.contains("ab"));
        assert!(deletes.contains("ac"));
        assert!(deletes.contains("bc"));

        let deletes = generate_deletes("abc", 2);
        assert!(deletes.contains("a"));
        assert!(deletes.contains("c"));
        assert_eq!(deletes.len(), 7);
    }
}

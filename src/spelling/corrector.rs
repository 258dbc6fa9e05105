//! "Did you mean?" correction for whole institution names.
//!
//! Each token of the query gets a short list of replacement options from the
//! [`ApproximateDictionary`]. Combinations of those options are tried in a
//! bounded walk (see [`CombinationIter`]) and a combination is only reported
//! when the resulting phrase is actually found by a [`PhraseValidator`],
//! normally the institution [`Trie`]. The corrector never invents names.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::spelling::combinations::{CombinationIter, EnumerationOrder, TokenOption};
use crate::spelling::dictionary::{ApproximateDictionary, Verbosity};
use crate::spelling::levenshtein::levenshtein_distance_threshold;
use crate::trie::{Trie, TrieSuggestion};

/// Words institution names very often end with, and users often mistype.
pub const DEFAULT_CATEGORY_MARKERS: [&str; 5] =
    ["university", "college", "institute", "school", "academy"];

/// Checks whether a candidate phrase names something real.
pub trait PhraseValidator {
    /// Matches for `phrase`; empty when the phrase is not indexed.
    fn validate(&self, phrase: &str) -> Vec<TrieSuggestion>;
}

impl PhraseValidator for Trie {
    fn validate(&self, phrase: &str) -> Vec<TrieSuggestion> {
        self.suggestions(phrase, 1)
    }
}

/// Configuration for the phrase corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum edit distance per token.
    pub max_edit_distance: usize,
    /// Maximum number of combinations tried per call.
    pub max_combinations: usize,
    /// Maximum dictionary candidates added per token.
    pub max_token_candidates: usize,
    /// Tokens shorter than this are never replaced.
    pub min_token_length: usize,
    /// Words tested directly against the last token.
    pub category_markers: Vec<String>,
    /// Walk order over combinations.
    pub enumeration_order: EnumerationOrder,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_edit_distance: 2,
            max_combinations: 20,
            max_token_candidates: 3,
            min_token_length: 3,
            category_markers: DEFAULT_CATEGORY_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            enumeration_order: EnumerationOrder::DepthFirst,
        }
    }
}

/// A single token replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionCandidate {
    /// Token index in the query.
    pub position: usize,
    /// Token as typed (lower case).
    pub original: String,
    /// Replacement token.
    pub corrected: String,
    /// Edit distance between the two.
    pub distance: u32,
}

/// A validated corrected query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectedPhrase {
    /// The corrected query, lower case, single-spaced.
    pub corrected_phrase: String,
    /// The query as typed.
    pub original_phrase: String,
    /// Replaced tokens.
    pub corrections: Vec<CorrectionCandidate>,
    /// Indexed names found for the corrected query.
    pub matched_institutions: Vec<TrieSuggestion>,
}

/// Combinatorial phrase corrector.
#[derive(Debug, Clone)]
pub struct PhraseCorrector {
    dictionary: ApproximateDictionary,
    config: CorrectorConfig,
}

impl PhraseCorrector {
    /// Create a corrector with the default configuration.
    pub fn new(dictionary: ApproximateDictionary) -> Self {
        Self::with_config(dictionary, CorrectorConfig::default())
    }

    /// Create a corrector with custom configuration.
    pub fn with_config(dictionary: ApproximateDictionary, config: CorrectorConfig) -> Self {
        PhraseCorrector { dictionary, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Get the token dictionary.
    pub fn dictionary(&self) -> &ApproximateDictionary {
        &self.dictionary
    }

    /// Get the token dictionary for incremental updates.
    pub fn dictionary_mut(&mut self) -> &mut ApproximateDictionary {
        &mut self.dictionary
    }

    /// Corrected versions of `phrase` that `validator` confirms, fewest edits first.
    ///
    /// The query itself, lower-cased and single-spaced, is the first
    /// combination tried; when it validates it is reported with no corrections.
    pub fn correct<V>(&self, phrase: &str, validator: &V, max_suggestions: usize) -> Vec<CorrectedPhrase>
    where
        V: PhraseValidator + ?Sized,
    {
        let tokens: Vec<String> = phrase
            .split_whitespace()
            .map(|token| token.to_lowercase())
            .collect();
        if tokens.is_empty() || max_suggestions == 0 {
            return Vec::new();
        }

        let last = tokens.len() - 1;
        let options: Vec<Vec<TokenOption>> = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| self.token_options(token, position == last))
            .collect();

        let mut combinations = CombinationIter::new(
            &options,
            self.config.max_combinations,
            self.config.enumeration_order,
        );
        let mut accepted = Vec::new();

        for combination in combinations.by_ref() {
            let test_phrase = combination
                .iter()
                .enumerate()
                .map(|(position, &index)| options[position][index].token.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            let matched = validator.validate(&test_phrase);
            if matched.is_empty() {
                continue;
            }
            trace!("accepted correction '{test_phrase}' for '{phrase}'");

            let corrections = combination
                .iter()
                .enumerate()
                .filter(|&(_, &index)| index != 0)
                .map(|(position, &index)| {
                    let option = &options[position][index];
                    CorrectionCandidate {
                        position,
                        original: tokens[position].clone(),
                        corrected: option.token.clone(),
                        distance: option.distance as u32,
                    }
                })
                .collect();

            accepted.push(CorrectedPhrase {
                corrected_phrase: test_phrase,
                original_phrase: phrase.to_string(),
                corrections,
                matched_institutions: matched,
            });
        }

        if combinations.budget_exhausted() {
            debug!(
                "combination budget of {} reached for '{}' with {} accepted",
                self.config.max_combinations,
                phrase,
                accepted.len()
            );
        }

        accepted.sort_by_key(|corrected: &CorrectedPhrase| corrected.corrections.len());
        accepted.truncate(max_suggestions);
        accepted
    }

    /// Options for one token, the token itself first.
    fn token_options(&self, token: &str, is_last: bool) -> Vec<TokenOption> {
        let mut options = vec![TokenOption::new(token, 0)];

        if token.chars().count() < self.config.min_token_length {
            return options;
        }

        let max_distance = self.config.max_edit_distance;
        let candidates = self
            .dictionary
            .lookup(token, max_distance, Verbosity::Closest);
        for candidate in candidates
            .into_iter()
            .filter(|candidate| candidate.term != token)
            .take(self.config.max_token_candidates)
        {
            options.push(TokenOption::new(candidate.term, candidate.distance));
        }

        if is_last {
            for marker in &self.config.category_markers {
                if options.iter().any(|option| option.token == *marker) {
                    continue;
                }
                if let Some(distance) = levenshtein_distance_threshold(token, marker, max_distance) {
                    options.push(TokenOption::new(marker.as_str(), distance));
                }
            }
        }

        options
    }
}

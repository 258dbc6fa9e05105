//! Configuration for the autocomplete index.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OnomaError, Result};
use crate::normalize::NormalizerConfig;
use crate::spelling::combinations::EnumerationOrder;
use crate::spelling::corrector::{CorrectorConfig, DEFAULT_CATEGORY_MARKERS};
use crate::spelling::dictionary::{
    DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_MIN_TOKEN_LENGTH, DEFAULT_PREFIX_LENGTH,
};
use crate::trie::DEFAULT_DISPLAY_MAX_CHARS;

/// Configuration for [`AutocompleteIndex`](crate::autocomplete::AutocompleteIndex).
///
/// Every field has a default, so a JSON file only needs the values it changes:
///
/// ```
/// use onoma::autocomplete::AutocompleteConfig;
///
/// let config = AutocompleteConfig::from_json_str(r#"{"max_combinations": 50}"#).unwrap();
/// assert_eq!(config.max_combinations, 50);
/// assert_eq!(config.max_edit_distance, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Maximum edit distance for token correction.
    pub max_edit_distance: usize,
    /// Leading characters used by the approximate dictionary index.
    pub prefix_length: usize,
    /// Maximum combinations tried per correction.
    pub max_combinations: usize,
    /// Maximum dictionary candidates per query token.
    pub max_token_candidates: usize,
    /// Query tokens shorter than this are never corrected.
    pub min_token_length: usize,
    /// Name tokens shorter than this are not added to the dictionary.
    pub min_dictionary_token_length: usize,
    /// Characters kept in display names.
    pub display_max_chars: usize,
    /// Result count used when the caller gives none.
    pub default_limit: usize,
    /// Walk order over correction combinations.
    pub enumeration_order: EnumerationOrder,
    /// Words tested directly against the last query token.
    pub category_markers: Vec<String>,
    /// Name cleaning tables.
    pub normalizer: NormalizerConfig,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            max_combinations: 20,
            max_token_candidates: 3,
            min_token_length: 3,
            min_dictionary_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            display_max_chars: DEFAULT_DISPLAY_MAX_CHARS,
            default_limit: 10,
            enumeration_order: EnumerationOrder::DepthFirst,
            category_markers: DEFAULT_CATEGORY_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl AutocompleteConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AutocompleteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject values the index cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_combinations == 0 {
            return Err(OnomaError::config("max_combinations must be positive"));
        }
        if self.prefix_length == 0 {
            return Err(OnomaError::config("prefix_length must be positive"));
        }
        if self.prefix_length <= self.max_edit_distance {
            return Err(OnomaError::config(format!(
                "prefix_length ({}) must exceed max_edit_distance ({})",
                self.prefix_length, self.max_edit_distance
            )));
        }
        if self.display_max_chars == 0 {
            return Err(OnomaError::config("display_max_chars must be positive"));
        }
        Ok(())
    }

    /// The corrector settings derived from this configuration.
    pub fn corrector_config(&self) -> CorrectorConfig {
        CorrectorConfig {
            max_edit_distance: self.max_edit_distance,
            max_combinations: self.max_combinations,
            max_token_candidates: self.max_token_candidates,
            min_token_length: self.min_token_length,
            category_markers: self.category_markers.clone(),
            enumeration_order: self.enumeration_order,
        }
    }
}

//! Prefix tree over institution names.
//!
//! Names are walked character by character in lower case, so lookups are
//! case-insensitive while every terminal node remembers the name in the
//! casing it was indexed with. Terminal nodes also carry a ranking frequency
//! and the institution [`Category`].

use std::cmp::Ordering;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{OnomaError, Result};
use crate::institution::Category;

/// Default number of characters kept in [`TrieSuggestion::display_name`].
pub const DEFAULT_DISPLAY_MAX_CHARS: usize = 50;

/// A node of the prefix tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: AHashMap<char, TrieNode>,
    is_terminal: bool,
    canonical_word: Option<String>,
    frequency: u64,
    category: Category,
}

/// A terminal word with its ranking data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieEntry {
    /// The word in its original casing.
    pub word: String,
    /// Ranking frequency.
    pub frequency: u64,
    /// Category tag.
    pub category: Category,
}

/// One autocomplete result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieSuggestion {
    /// Name shortened for display.
    pub display_name: String,
    /// The complete indexed name.
    pub full_name: String,
    /// Category tag.
    pub category: Category,
}

impl TrieSuggestion {
    fn from_entry(entry: TrieEntry, display_max_chars: usize) -> Self {
        TrieSuggestion {
            display_name: truncate_display(&entry.word, display_max_chars),
            full_name: entry.word,
            category: entry.category,
        }
    }
}

/// Case-insensitive prefix tree.
#[derive(Debug, Clone)]
pub struct Trie {
    root: TrieNode,
    word_count: usize,
    display_max_chars: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Trie {
            root: TrieNode::default(),
            word_count: 0,
            display_max_chars: DEFAULT_DISPLAY_MAX_CHARS,
        }
    }

    /// Create an empty trie with a custom display truncation length.
    pub fn with_display_limit(display_max_chars: usize) -> Self {
        Trie {
            display_max_chars,
            ..Self::new()
        }
    }

    /// Insert a word, or raise the frequency of an existing one.
    ///
    /// The stored frequency only ever grows (`max(old, new)`); category and
    /// casing follow the latest insertion. Returns `true` when the word was
    /// not present before. Blank words are ignored.
    pub fn insert(&mut self, word: &str, frequency: u64, category: Category) -> bool {
        if word.trim().is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for ch in word.chars().flat_map(char::to_lowercase) {
            node = node.children.entry(ch).or_default();
        }

        let is_new = !node.is_terminal;
        node.is_terminal = true;
        node.canonical_word = Some(word.to_string());
        node.frequency = node.frequency.max(frequency);
        node.category = category;

        if is_new {
            self.word_count += 1;
        }
        is_new
    }

    /// Exact, case-insensitive membership test.
    pub fn search(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(|node| node.is_terminal)
    }

    /// Stored frequency of an exact word.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.find_node(word)
            .filter(|node| node.is_terminal)
            .map(|node| node.frequency)
    }

    /// Stored category of an exact word.
    pub fn category(&self, word: &str) -> Option<Category> {
        self.find_node(word)
            .filter(|node| node.is_terminal)
            .map(|node| node.category)
    }

    /// Up to `limit` words starting with `prefix`, most frequent first.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<TrieSuggestion> {
        if limit == 0 {
            return Vec::new();
        }

        let Some(node) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut entries = collect_entries(node);
        entries.sort_by(compare_entries);
        entries.truncate(limit);

        entries
            .into_iter()
            .map(|entry| TrieSuggestion::from_entry(entry, self.display_max_chars))
            .collect()
    }

    /// Every indexed word with its ranking data, most frequent first.
    pub fn entries(&self) -> Vec<TrieEntry> {
        let mut entries = collect_entries(&self.root);
        entries.sort_by(compare_entries);
        entries
    }

    /// Every indexed word, most frequent first.
    pub fn all_words(&self) -> Vec<String> {
        self.entries().into_iter().map(|entry| entry.word).collect()
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of distinct indexed words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Check structural invariants: `word_count` matches the number of
    /// terminal nodes and every terminal node carries its word.
    pub fn verify(&self) -> Result<()> {
        let mut terminals = 0usize;
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            if node.is_terminal {
                if node.canonical_word.is_none() {
                    return Err(OnomaError::corrupt_index(
                        "terminal node without a canonical word",
                    ));
                }
                terminals += 1;
            }
            stack.extend(node.children.values());
        }

        if terminals != self.word_count {
            return Err(OnomaError::corrupt_index(format!(
                "word_count {} != terminal nodes {}",
                self.word_count, terminals
            )));
        }

        Ok(())
    }

    fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars().flat_map(char::to_lowercase) {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Gather all terminal descendants of `start` with an explicit stack.
fn collect_entries(start: &TrieNode) -> Vec<TrieEntry> {
    let mut entries = Vec::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if node.is_terminal
            && let Some(word) = &node.canonical_word
        {
            entries.push(TrieEntry {
                word: word.clone(),
                frequency: node.frequency,
                category: node.category,
            });
        }
        stack.extend(node.children.values());
    }

    entries
}

fn compare_entries(a: &TrieEntry, b: &TrieEntry) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.word.cmp(&b.word))
}

/// Keep the first `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_display(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

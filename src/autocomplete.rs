//! Institution name autocomplete.
//!
//! [`AutocompleteIndex`] ties the name normalizer, the prefix [`Trie`] and the
//! phrase corrector together: prefix matches are served from the trie, and
//! when a query matches nothing it is run through "Did you mean?" correction
//! instead.
//!
//! [`Trie`]: crate::trie::Trie

pub mod config;
pub mod index;
pub mod stats;

// Re-export commonly used types
pub use config::AutocompleteConfig;
pub use index::{AutocompleteIndex, IndexSnapshot};
pub use stats::{IndexStats, LoadReport};

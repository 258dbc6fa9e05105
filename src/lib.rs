//! # Onoma
//!
//! Autocomplete and spelling correction for institution names.
//!
//! ## Features
//!
//! - Case-insensitive prefix suggestions ranked by frequency
//! - Name cleaning and prefix-stripped variants ("University of X" -> "X")
//! - Bounded edit-distance token dictionary
//! - Validated "Did you mean?" phrase correction
//! - Lock-free reads over copy-on-write index snapshots

pub mod autocomplete;
pub mod cli;
pub mod error;
pub mod institution;
pub mod loader;
pub mod normalize;
pub mod spelling;
pub mod trie;

pub mod prelude {
    pub use crate::autocomplete::{AutocompleteConfig, AutocompleteIndex, IndexStats, LoadReport};
    pub use crate::error::{OnomaError, Result};
    pub use crate::institution::{Category, InstitutionRecord};
    pub use crate::loader::{JsonlSource, RecordSource, VecSource};
    pub use crate::trie::TrieSuggestion;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

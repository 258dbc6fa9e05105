//! Spelling correction for institution queries.
//!
//! This module provides the token-level approximate dictionary, the edit
//! distance it is verified with, and the phrase corrector that turns a
//! mistyped query into "Did you mean?" suggestions backed by real names.

pub mod combinations;
pub mod corrector;
pub mod dictionary;
pub mod levenshtein;

// Re-export commonly used types
pub use combinations::{CombinationIter, EnumerationOrder, TokenOption};
pub use corrector::*;
pub use dictionary::*;
pub use levenshtein::*;

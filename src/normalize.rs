//! Institution name cleaning and alternate-form derivation.
//!
//! Raw names coming out of regulatory and directory datasets carry legal
//! boilerplate ("..., National Association", "Inc.") that users never type.
//! [`NameNormalizer::clean`] strips it, and [`NameNormalizer::normalize_variants`]
//! derives secondary forms such as "Stanford" from "University of Stanford" so
//! that either spelling finds the institution.

use serde::{Deserialize, Serialize};

use crate::institution::Category;

/// Suffix and prefix tables used by [`NameNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Boilerplate suffixes, tried in order; at most one is stripped.
    pub suffixes: Vec<String>,
    /// Prefix phrases for education names, in priority order.
    pub education_prefixes: Vec<String>,
    /// Prefix phrases for financial names, in priority order.
    pub financial_prefixes: Vec<String>,
    /// Prefix phrases for medical names, in priority order.
    pub medical_prefixes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        NormalizerConfig {
            suffixes: owned(&[
                "National Association",
                "N.A.",
                "Inc.",
                "Inc",
                "LLC",
                "L.L.C.",
                "Corporation",
                "Corp.",
                "Co.",
                "Ltd.",
                "F.S.B.",
                "FSB",
            ]),
            education_prefixes: owned(&[
                "The University of",
                "University of",
                "College of",
                "Institute of",
                "School of",
            ]),
            financial_prefixes: owned(&["The Bank of", "Bank of", "Credit Union of"]),
            medical_prefixes: owned(&["Hospital of", "Medical Center of", "Clinic of"]),
        }
    }
}

impl NormalizerConfig {
    /// Prefix phrases that apply to the given category.
    pub fn prefixes_for(&self, category: Category) -> &[String] {
        match category {
            Category::Education => &self.education_prefixes,
            Category::Financial => &self.financial_prefixes,
            Category::Medical => &self.medical_prefixes,
            Category::Unknown => &[],
        }
    }
}

/// Cleans raw institution names and derives alternate forms.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    config: NormalizerConfig,
}

impl NameNormalizer {
    /// Create a normalizer with the default tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom tables.
    pub fn with_config(config: NormalizerConfig) -> Self {
        NameNormalizer { config }
    }

    /// Get the active tables.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Truncate at the first comma and strip one trailing boilerplate suffix.
    ///
    /// A suffix is only stripped when it is a separate word and something is
    /// left afterwards, so "Zinc" and a bare "LLC" are kept as they are.
    pub fn clean(&self, name: &str) -> String {
        let head = match name.find(',') {
            Some(pos) => &name[..pos],
            None => name,
        };
        let head = head.trim();

        for suffix in &self.config.suffixes {
            if let Some(rest) = strip_suffix_ignore_case(head, suffix) {
                let rest = rest.trim_end();
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
        }

        head.to_string()
    }

    /// Alternate forms of an already-cleaned name for its category.
    ///
    /// Only the first matching prefix phrase is applied.
    pub fn normalize_variants(&self, name: &str, category: Category) -> Vec<String> {
        let name = name.trim();

        self.config
            .prefixes_for(category)
            .iter()
            .find_map(|prefix| strip_prefix_ignore_case(name, prefix))
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
            .map(|rest| vec![rest.to_string()])
            .unwrap_or_default()
    }
}

/// Strip `prefix` when it is followed by whitespace.
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    let rest = &name[prefix.len()..];

    (head.eq_ignore_ascii_case(prefix) && rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// Strip `suffix` when it is preceded by whitespace.
fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    let rest = &name[..split];

    (tail.eq_ignore_ascii_case(suffix) && rest.ends_with(char::is_whitespace)).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_truncates_at_comma() {
        let normalizer = NameNormalizer::new();
        assert_eq!(
            normalizer.clean("BancCentral, National Association"),
            "BancCentral"
        );
        assert_eq!(normalizer.clean("Mayo Clinic, Rochester, MN"), "Mayo Clinic");
    }

    #[test]
    fn test_clean_strips_one_suffix() {
        let normalizer = NameNormalizer::new();
        assert_eq!(
            normalizer.clean("Citibank National Association"),
            "Citibank"
        );
        assert_eq!(normalizer.clean("Acme Holdings Inc."), "Acme Holdings");
        assert_eq!(normalizer.clean("Acme Holdings LLC"), "Acme Holdings");
        // Only one suffix is removed.
        assert_eq!(normalizer.clean("Acme Corp. Inc."), "Acme Corp.");
    }

    #[test]
    fn test_clean_respects_word_boundaries() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.clean("Zinc"), "Zinc");
        assert_eq!(normalizer.clean("LLC"), "LLC");
        assert_eq!(normalizer.clean("Harvard University"), "Harvard University");
    }

    #[test]
    fn test_clean_empty_passthrough() {
        let normalizer = NameNormalizer::new();
        assert_eq!(normalizer.clean(""), "");
        assert_eq!(normalizer.clean(", Inc."), "");
    }

    #[test]
    fn test_normalize_variants_education() {
        let normalizer = NameNormalizer::new();
        assert_eq!(
            normalizer.normalize_variants("University of Stanford", Category::Education),
            vec!["Stanford".to_string()]
        );
        assert_eq!(
            normalizer.normalize_variants("the university of chicago", Category::Education),
            vec!["chicago".to_string()]
        );
        assert!(normalizer
            .normalize_variants("Harvard University", Category::Education)
            .is_empty());
    }

    #[test]
    fn test_normalize_variants_category_specific() {
        let normalizer = NameNormalizer::new();
        assert_eq!(
            normalizer.normalize_variants("Bank of America", Category::Financial),
            vec!["America".to_string()]
        );
        // Education prefixes do not apply to financial names.
        assert!(normalizer
            .normalize_variants("University of Stanford", Category::Financial)
            .is_empty());
        assert!(normalizer
            .normalize_variants("Bank of America", Category::Unknown)
            .is_empty());
    }

    #[test]
    fn test_normalize_variants_requires_remainder() {
        let normalizer = NameNormalizer::new();
        assert!(normalizer
            .normalize_variants("University of", Category::Education)
            .is_empty());
        assert!(normalizer
            .normalize_variants("University ofStanford", Category::Education)
            .is_empty());
    }
}

//! Institution records and categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OnomaError, Result};

/// Coarse classification attached to every indexed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    /// Universities, colleges, schools.
    Education,
    /// Banks, credit unions.
    Financial,
    /// Hospitals, clinics.
    Medical,
    /// Anything else.
    #[default]
    Unknown,
}

impl Category {
    /// Lower-case name used in JSON and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Education => "education",
            Category::Financial => "financial",
            Category::Medical => "medical",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Loaders hand over free-form category labels; anything unrecognised is Unknown.
impl From<String> for Category {
    fn from(label: String) -> Self {
        label.parse().unwrap_or(Category::Unknown)
    }
}

impl FromStr for Category {
    type Err = OnomaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "education" => Ok(Category::Education),
            "financial" => Ok(Category::Financial),
            "medical" => Ok(Category::Medical),
            "unknown" => Ok(Category::Unknown),
            other => Err(OnomaError::invalid_argument(format!(
                "unknown category '{other}'"
            ))),
        }
    }
}

/// One institution as handed over by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    /// Raw name, possibly with boilerplate suffixes.
    pub name: String,
    /// Category tag.
    #[serde(default)]
    pub category: Category,
    /// Optional explicit ranking weight; positional weight is used when absent.
    #[serde(default)]
    pub frequency: Option<u64>,
}

impl InstitutionRecord {
    /// Create a record without an explicit frequency.
    pub fn new<S: Into<String>>(name: S, category: Category) -> Self {
        InstitutionRecord {
            name: name.into(),
            category,
            frequency: None,
        }
    }

    /// Set an explicit frequency.
    pub fn with_frequency(mut self, frequency: u64) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Education".parse::<Category>().unwrap(), Category::Education);
        assert_eq!(" financial ".parse::<Category>().unwrap(), Category::Financial);
        assert_eq!("MEDICAL".parse::<Category>().unwrap(), Category::Medical);
        assert!("retail".parse::<Category>().is_err());
    }

    #[test]
    fn test_record_deserialize() {
        let record: InstitutionRecord = serde_json::from_str(
            r#"{"name": "Harvard University", "category": "Education", "frequency": 100}"#,
        )
        .unwrap();
        assert_eq!(record.name, "Harvard University");
        assert_eq!(record.category, Category::Education);
        assert_eq!(record.frequency, Some(100));

        let record: InstitutionRecord =
            serde_json::from_str(r#"{"name": "Mystery Org", "category": "retail"}"#).unwrap();
        assert_eq!(record.category, Category::Unknown);
        assert_eq!(record.frequency, None);
    }

    #[test]
    fn test_record_builder() {
        let record = InstitutionRecord::new("Bank of America", Category::Financial).with_frequency(7);
        assert_eq!(record.frequency, Some(7));
        assert_eq!(record.category.to_string(), "financial");
    }
}

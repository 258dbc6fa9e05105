//! Record sources feeding the index.
//!
//! A [`RecordSource`] hands over already-structured [`InstitutionRecord`]s.
//! Failures are isolated at two levels: a malformed record is skipped and
//! counted inside its [`SourceBatch`], and a source that cannot be read at all
//! is reported on its own without affecting the others.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::warn;
use rayon::prelude::*;

use crate::error::{OnomaError, Result};
use crate::institution::InstitutionRecord;

/// Records produced by one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBatch {
    /// Records that were read successfully, in source order.
    pub records: Vec<InstitutionRecord>,
    /// Number of records that could not be parsed.
    pub malformed: usize,
}

impl SourceBatch {
    /// A batch with no malformed records.
    pub fn from_records(records: Vec<InstitutionRecord>) -> Self {
        SourceBatch {
            records,
            malformed: 0,
        }
    }
}

/// Anything that can provide institution records.
pub trait RecordSource: Send + Sync {
    /// Human-readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Read all records.
    fn load(&self) -> Result<SourceBatch>;
}

/// In-memory records.
#[derive(Debug, Clone)]
pub struct VecSource {
    name: String,
    records: Vec<InstitutionRecord>,
}

impl VecSource {
    /// Wrap a list of records.
    pub fn new<S: Into<String>>(name: S, records: Vec<InstitutionRecord>) -> Self {
        VecSource {
            name: name.into(),
            records,
        }
    }
}

impl RecordSource for VecSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<SourceBatch> {
        Ok(SourceBatch::from_records(self.records.clone()))
    }
}

/// Records stored one JSON object per line.
///
/// ```text
/// {"name": "Harvard University", "category": "education", "frequency": 100}
/// {"name": "BancCentral, National Association", "category": "financial"}
/// ```
#[derive(Debug, Clone)]
pub struct JsonlSource {
    name: String,
    path: PathBuf,
}

impl JsonlSource {
    /// Create a source reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        JsonlSource {
            name: path.display().to_string(),
            path,
        }
    }
}

impl RecordSource for JsonlSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<SourceBatch> {
        let file = File::open(&self.path)
            .map_err(|e| OnomaError::source_load(&self.name, e.to_string()))?;
        let reader = BufReader::new(file);
        let mut batch = SourceBatch::default();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| OnomaError::source_load(&self.name, e.to_string()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<InstitutionRecord>(line) {
                Ok(record) => batch.records.push(record),
                Err(e) => {
                    warn!("{}:{}: skipping malformed record: {}", self.name, line_number + 1, e);
                    batch.malformed += 1;
                }
            }
        }

        Ok(batch)
    }
}

/// Outcome of loading one source.
#[derive(Debug)]
pub struct SourceOutcome {
    /// Source name.
    pub name: String,
    /// The batch, or why the source failed.
    pub result: Result<SourceBatch>,
}

/// Load all sources in parallel, keeping the input order in the output.
pub fn load_sources(sources: &[Box<dyn RecordSource>]) -> Vec<SourceOutcome> {
    sources
        .par_iter()
        .map(|source| SourceOutcome {
            name: source.name().to_string(),
            result: source.load(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::institution::Category;

    #[test]
    fn test_vec_source() {
        let source = VecSource::new(
            "inline",
            vec![InstitutionRecord::new("Mayo Clinic", Category::Medical)],
        );

        let batch = source.load().unwrap();
        assert_eq!(source.name(), "inline");
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.malformed, 0);
    }

    #[test]
    fn test_jsonl_source_skips_malformed_lines() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"name": "Harvard University", "category": "education", "frequency": 100}}"#
        )
        .unwrap();
        writeln!(temp_file, "not json at all").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, r#"{{"name": "Bank of America", "category": "Financial"}}"#).unwrap();
        writeln!(temp_file, r#"{{"category": "medical"}}"#).unwrap();
        temp_file.flush().unwrap();

        let batch = JsonlSource::new(temp_file.path()).load().unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.malformed, 2);
        assert_eq!(batch.records[0].frequency, Some(100));
        assert_eq!(batch.records[1].category, Category::Financial);
    }

    #[test]
    fn test_jsonl_source_missing_file() {
        let source = JsonlSource::new("/nonexistent/institutions.jsonl");
        match source.load() {
            Err(OnomaError::SourceLoad { source_name, .. }) => {
                assert_eq!(source_name, "/nonexistent/institutions.jsonl");
            }
            other => panic!("Expected source load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_sources_isolates_failures() {
        let sources: Vec<Box<dyn RecordSource>> = vec![
            Box::new(VecSource::new(
                "first",
                vec![InstitutionRecord::new("Yale University", Category::Education)],
            )),
            Box::new(JsonlSource::new("/nonexistent/second.jsonl")),
            Box::new(VecSource::new("third", Vec::new())),
        ];

        let outcomes = load_sources(&sources);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "first");
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }
}

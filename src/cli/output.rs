//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::autocomplete::{IndexStats, LoadReport};
use crate::cli::args::{OnomaArgs, OutputFormat};
use crate::error::Result;
use crate::spelling::CorrectedPhrase;
use crate::trie::TrieSuggestion;

/// Result structure for `suggest`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResults {
    pub prefix: String,
    pub suggestions: Vec<TrieSuggestion>,
    pub duration_ms: u64,
}

/// Result structure for `correct`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectResults {
    pub phrase: String,
    pub corrections: Vec<CorrectedPhrase>,
    pub duration_ms: u64,
}

/// Result structure for `stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResults {
    pub stats: IndexStats,
    pub load_report: Option<LoadReport>,
    pub build_duration_ms: u64,
}

/// Anything the CLI can print.
pub trait HumanOutput: Serialize {
    /// Render for a terminal.
    fn render_human(&self) -> String;
}

impl HumanOutput for SuggestResults {
    fn render_human(&self) -> String {
        if self.suggestions.is_empty() {
            return format!("No suggestions for '{}'", self.prefix);
        }

        let mut out = format!("Suggestions for '{}':\n", self.prefix);
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {} [{}]\n",
                i + 1,
                suggestion.display_name,
                suggestion.category
            ));
        }
        out.push_str(&format!("Search time: {}ms", self.duration_ms));
        out
    }
}

impl HumanOutput for CorrectResults {
    fn render_human(&self) -> String {
        if self.corrections.is_empty() {
            return format!("No corrections for '{}'", self.phrase);
        }

        let mut out = String::new();
        for corrected in &self.corrections {
            out.push_str(&format!("Did you mean: {}?\n", corrected.corrected_phrase));
            for correction in &corrected.corrections {
                out.push_str(&format!(
                    "  '{}' -> '{}' (distance {})\n",
                    correction.original, correction.corrected, correction.distance
                ));
            }
            for institution in &corrected.matched_institutions {
                out.push_str(&format!(
                    "  matches: {} [{}]\n",
                    institution.full_name, institution.category
                ));
            }
        }
        out.push_str(&format!("Search time: {}ms", self.duration_ms));
        out
    }
}

impl HumanOutput for StatsResults {
    fn render_human(&self) -> String {
        let mut out = String::from("Index Statistics:\n");
        out.push_str(&format!("Total institutions: {}\n", self.stats.total_institutions));
        out.push_str(&format!("Dictionary terms: {}\n", self.stats.dictionary_terms));
        out.push_str(&format!("Initialized: {}\n", self.stats.initialized));

        if let Some(report) = &self.load_report {
            out.push_str("\nLoad Report:\n");
            let value = serde_json::to_value(report).unwrap_or_default();
            if let Some(obj) = value.as_object() {
                for (key, val) in obj {
                    out.push_str(&format!("{key}: {val}\n"));
                }
            }
        }

        out.push_str(&format!("Build time: {}ms", self.build_duration_ms));
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &OnomaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &OnomaArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &OnomaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::institution::Category;

    #[test]
    fn test_render_suggestions() {
        let results = SuggestResults {
            prefix: "harv".to_string(),
            suggestions: vec![TrieSuggestion {
                display_name: "Harvard University".to_string(),
                full_name: "Harvard University".to_string(),
                category: Category::Education,
            }],
            duration_ms: 0,
        };

        let rendered = results.render_human();
        assert!(rendered.contains("  1. Harvard University [education]"));
    }

    #[test]
    fn test_render_empty_results() {
        let results = CorrectResults {
            phrase: "zzz".to_string(),
            corrections: Vec::new(),
            duration_ms: 0,
        };
        assert_eq!(results.render_human(), "No corrections for 'zzz'");
    }

    #[test]
    fn test_render_stats_with_report() {
        let results = StatsResults {
            stats: IndexStats {
                total_institutions: 3,
                initialized: true,
                dictionary_terms: 5,
            },
            load_report: Some(LoadReport {
                sources_failed: 1,
                ..Default::default()
            }),
            build_duration_ms: 2,
        };

        let rendered = results.render_human();
        assert!(rendered.contains("Total institutions: 3"));
        assert!(rendered.contains("sources_failed: 1"));
    }
}

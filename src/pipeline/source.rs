use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::config::SourceConfig;

/// A line of OCR output waiting to be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// 1-based line number in the source text
    pub line_no: usize,
    pub text: String,
}

/// Lines made only of digits, optionally with decimal or thousands separators
fn numeric_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\d+(?:[.,]\d+)*\s*$").expect("static pattern is valid")
    })
}

pub fn is_numeric_line(line: &str) -> bool {
    numeric_line_pattern().is_match(line)
}

/// Split raw OCR text into candidate lines, dropping the lines the classifier
/// should never see.
pub fn split_candidates(text: &str, config: &SourceConfig) -> Vec<Candidate> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = if config.trim { line.trim() } else { line };

            if config.skip_blank && line.trim().is_empty() {
                return None;
            }
            if config.skip_numeric && is_numeric_line(line) {
                return None;
            }

            Some(Candidate {
                line_no: idx + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

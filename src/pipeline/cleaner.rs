#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::source::{split_candidates, Candidate};
use crate::classifier::{GarbageClassifier, GarbageReason, Verdict};
use crate::config::{CleanConfig, Granularity, SourceConfig};
use crate::error::ConfigError;

/// One classified unit (a line, or a word of a line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classified {
    pub line_no: usize,
    pub text: String,
    pub verdict: Verdict,
}

/// A unit dropped as garbage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub line_no: usize,
    pub text: String,
    pub rule: GarbageReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub units: usize,
    pub kept: usize,
    pub rejected: usize,
    pub by_rule: BTreeMap<GarbageReason, usize>,
}

impl CleanStats {
    fn record(&mut self, verdict: Verdict) {
        self.units += 1;
        match verdict {
            Verdict::Clean => self.kept += 1,
            Verdict::Garbage(reason) => {
                self.rejected += 1;
                *self.by_rule.entry(reason).or_default() += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &CleanStats) {
        self.units += other.units;
        self.kept += other.kept;
        self.rejected += other.rejected;
        for (reason, count) in &other.by_rule {
            *self.by_rule.entry(*reason).or_default() += count;
        }
    }
}

/// Result of cleaning one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedText {
    /// Surviving lines in source order
    pub lines: Vec<String>,
    pub rejections: Vec<Rejection>,
    pub stats: CleanStats,
}

impl CleanedText {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Runs OCR text through the classifier and keeps what is clean
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    classifier: GarbageClassifier,
    source: SourceConfig,
    granularity: Granularity,
    parallel: bool,
}

impl TextCleaner {
    pub fn from_config(config: &CleanConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: GarbageClassifier::with_config(config.rules.clone())?,
            source: config.source.clone(),
            granularity: config.granularity,
            parallel: config.parallel,
        })
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn classifier(&self) -> &GarbageClassifier {
        &self.classifier
    }

    /// Classify every unit of `text`, in source order
    pub fn classify_text(&self, text: &str) -> Vec<Classified> {
        let units = self.units(split_candidates(text, &self.source));
        let verdicts = self.classify_all(&units);

        units
            .into_iter()
            .zip(verdicts)
            .map(|(unit, verdict)| Classified {
                line_no: unit.line_no,
                text: unit.text,
                verdict,
            })
            .collect()
    }

    /// Drop garbage from `text`. In word mode a line survives with its clean
    /// words joined by single spaces, or disappears if none are left.
    pub fn clean(&self, text: &str) -> CleanedText {
        let mut cleaned = CleanedText::default();
        let mut current: Option<(usize, Vec<String>)> = None;

        for unit in self.classify_text(text) {
            cleaned.stats.record(unit.verdict);

            if let Verdict::Garbage(rule) = unit.verdict {
                cleaned.rejections.push(Rejection {
                    line_no: unit.line_no,
                    text: unit.text,
                    rule,
                });
                continue;
            }

            if self.granularity == Granularity::Word {
                if let Some((line_no, words)) = current.as_mut() {
                    if *line_no == unit.line_no {
                        words.push(unit.text);
                        continue;
                    }
                }
            }

            if let Some((_, words)) = current.take() {
                cleaned.lines.push(words.join(" "));
            }
            current = Some((unit.line_no, vec![unit.text]));
        }

        if let Some((_, words)) = current {
            cleaned.lines.push(words.join(" "));
        }

        debug!(
            units = cleaned.stats.units,
            kept = cleaned.stats.kept,
            rejected = cleaned.stats.rejected,
            "cleaned text"
        );

        cleaned
    }

    fn units(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        match self.granularity {
            Granularity::Line => candidates,
            Granularity::Word => candidates
                .iter()
                .flat_map(|candidate| {
                    candidate.text.split_whitespace().map(|word| Candidate {
                        line_no: candidate.line_no,
                        text: word.to_string(),
                    })
                })
                .collect(),
        }
    }

    #[cfg(feature = "parallel")]
    fn classify_all(&self, units: &[Candidate]) -> Vec<Verdict> {
        if self.parallel {
            // indexed iterator, so collect keeps input order
            units
                .par_iter()
                .map(|unit| self.classifier.classify(&unit.text))
                .collect()
        } else {
            self.classify_sequential(units)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn classify_all(&self, units: &[Candidate]) -> Vec<Verdict> {
        if self.parallel {
            tracing::warn!("built without the `parallel` feature, classifying sequentially");
        }
        self.classify_sequential(units)
    }

    fn classify_sequential(&self, units: &[Candidate]) -> Vec<Verdict> {
        units
            .iter()
            .map(|unit| self.classifier.classify(&unit.text))
            .collect()
    }
}

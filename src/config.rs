use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::classifier::rules::ALNUM_THRESHOLDS;
use crate::error::ConfigError;

/// Thresholds for the six garbage rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Rule L: strings longer than this are garbage
    pub max_length: usize,
    /// Rule A: minimum alphanumeric ratio keyed by exact string length.
    /// Entries in a config file override the paper's table one by one.
    #[serde(deserialize_with = "merge_alnum_thresholds")]
    pub alnum_thresholds: BTreeMap<usize, f64>,
    /// Rule A: minimum ratio for lengths missing from `alnum_thresholds`
    pub default_alnum_threshold: f64,
    /// Rule R: this many identical characters in a row is garbage
    pub max_identical_run: usize,
    /// Rule V
    pub min_vowel_ratio: f64,
    pub max_vowel_ratio: f64,
    /// Rule V: longest vowel-free word accepted ("rhythms")
    pub max_consonants_without_vowels: usize,
    /// Rule V: longest consonant-free word accepted ("IEEE")
    pub max_vowels_without_consonants: usize,
    /// Rule C: an uppercase letter right after one of these is legitimate
    pub capital_exempt_after: Vec<char>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_length: 40,
            alnum_thresholds: default_alnum_thresholds(),
            default_alnum_threshold: 0.5,
            max_identical_run: 4,
            min_vowel_ratio: 0.1,
            max_vowel_ratio: 10.0,
            max_consonants_without_vowels: "rhythms".len(),
            max_vowels_without_consonants: "IEEE".len(),
            capital_exempt_after: vec!['.', '-', '\'', '/'],
        }
    }
}

fn default_alnum_thresholds() -> BTreeMap<usize, f64> {
    ALNUM_THRESHOLDS.iter().copied().collect()
}

fn merge_alnum_thresholds<'de, D>(deserializer: D) -> Result<BTreeMap<usize, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<usize, f64>::deserialize(deserializer)?;
    let mut thresholds = default_alnum_thresholds();
    thresholds.extend(overrides);
    Ok(thresholds)
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        for (&length, &value) in &self.alnum_thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::AlnumThresholdOutOfRange { length, value });
            }
        }
        if !(0.0..=1.0).contains(&self.default_alnum_threshold) {
            return Err(ConfigError::DefaultAlnumThresholdOutOfRange(
                self.default_alnum_threshold,
            ));
        }
        if self.max_identical_run < 2 {
            return Err(ConfigError::IdenticalRunTooShort(self.max_identical_run));
        }
        if !(self.min_vowel_ratio >= 0.0 && self.min_vowel_ratio <= self.max_vowel_ratio) {
            return Err(ConfigError::VowelRatioBounds {
                min: self.min_vowel_ratio,
                max: self.max_vowel_ratio,
            });
        }
        Ok(())
    }

    /// Minimum alphanumeric ratio for a string of `length` characters
    pub fn alnum_threshold(&self, length: usize) -> f64 {
        self.alnum_thresholds
            .get(&length)
            .copied()
            .unwrap_or(self.default_alnum_threshold)
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Producer-side filtering applied before lines reach the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub skip_blank: bool,
    pub skip_numeric: bool,
    pub trim: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            skip_blank: true,
            skip_numeric: true,
            trim: true,
        }
    }
}

/// Unit handed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Whole lines are kept or dropped
    #[default]
    Line,
    /// Whitespace-separated tokens are kept or dropped
    Word,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub rules: RuleConfig,
    pub source: SourceConfig,
    pub granularity: Granularity,
    pub parallel: bool,
}

impl CleanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {:?}", path))?;

        Ok(config)
    }
}

impl fmt::Display for CleanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

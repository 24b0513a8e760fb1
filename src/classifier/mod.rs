//! Rule-based detection of OCR garbage strings, after Taghva, Nartker, Condit
//! and Borsack, "Automatic Removal of Garbage Strings in OCR Text".

pub mod metrics;
pub mod rules;
mod verdict;

pub use verdict::{GarbageReason, Verdict};

use tracing::trace;

use crate::config::RuleConfig;
use crate::error::ConfigError;
use rules::RULES;

/// Stateless classifier. Holds only its thresholds, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct GarbageClassifier {
    config: RuleConfig,
}

impl GarbageClassifier {
    /// Classifier with the thresholds published in the paper
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Classify one string. Total over all inputs.
    pub fn classify(&self, text: &str) -> Verdict {
        let chars: Vec<char> = text.chars().collect();

        for (reason, fires) in RULES {
            if fires(&self.config, &chars) {
                trace!(rule = %reason, text, "garbage");
                return Verdict::Garbage(reason);
            }
        }

        Verdict::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Verdict {
        GarbageClassifier::new().classify(text)
    }

    #[test]
    fn test_empty_string_is_garbage() {
        assert_eq!(classify(""), Verdict::Garbage(GarbageReason::BadAlnumRatio));
    }

    #[test]
    fn test_length_checked_before_repetition() {
        assert_eq!(classify(&"a".repeat(41)), Verdict::Garbage(GarbageReason::TooLong));
        assert_eq!(classify("aaaa"), Verdict::Garbage(GarbageReason::RepeatedChar));
    }

    #[test]
    fn test_consonant_run() {
        assert_eq!(
            classify("xyzxyzqrst"),
            Verdict::Garbage(GarbageReason::BadVowelConsonantRatio)
        );
    }

    #[test]
    fn test_mixed_interior_punctuation() {
        assert_eq!(
            classify("a,b;cde"),
            Verdict::Garbage(GarbageReason::TwoDistinctPunctuation)
        );
    }

    #[test]
    fn test_embedded_capital() {
        assert_eq!(
            classify("chiCken"),
            Verdict::Garbage(GarbageReason::UppercaseInLowercase)
        );
    }

    #[test]
    fn test_clean_words() {
        for word in ["needed.The", "Salad", "coffee", "$4.99", "Bacon,", "(v)", "IEEE"] {
            assert_eq!(classify(word), Verdict::Clean, "{word:?}");
        }
    }

    #[test]
    fn test_menu_noise() {
        assert!(classify("~~~~~~~~").is_garbage());
        assert!(classify("|:;.,'").is_garbage());
        assert!(classify("mmmmrnrnrnrn").is_garbage());
    }

    #[test]
    fn test_alphanumeric_is_one_definition() {
        assert_eq!(classify("m²½¼¾⅓"), Verdict::Clean);
        assert_eq!(classify("ab‿⁀‿⁀"), Verdict::Garbage(GarbageReason::BadAlnumRatio));
    }

    #[test]
    fn test_custom_thresholds() {
        let config = RuleConfig {
            max_length: 5,
            ..RuleConfig::default()
        };
        let classifier = GarbageClassifier::with_config(config).unwrap();
        assert_eq!(
            classifier.classify("Burger"),
            Verdict::Garbage(GarbageReason::TooLong)
        );
        assert!(GarbageClassifier::new().classify("Burger").is_clean());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RuleConfig {
            max_length: 0,
            ..RuleConfig::default()
        };
        assert_eq!(
            GarbageClassifier::with_config(config).unwrap_err(),
            ConfigError::ZeroMaxLength
        );
    }

    #[test]
    fn test_classifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GarbageClassifier>();
    }
}

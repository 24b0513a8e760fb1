//! The six garbage rules of Taghva et al., each a pure predicate over the
//! characters of one string.

use super::metrics::{alnum_ratio, interior_punctuation, letter_counts, longest_run};
use super::verdict::GarbageReason;
use crate::config::RuleConfig;

/// Minimum alphanumeric ratio by exact string length. Very short strings may
/// be mostly symbols (price markers, bullets).
pub const ALNUM_THRESHOLDS: [(usize, f64); 5] = [
    (1, 0.0),
    (2, 0.0),
    (3, 0.32),
    (4, 0.24),
    (5, 0.39),
];

/// Characters dropped from the front and back before looking for punctuation.
/// Two at the back so that endings such as `).` are not flagged.
const PUNCT_LEAD: usize = 1;
const PUNCT_TRAIL: usize = 2;

pub type RulePredicate = fn(&RuleConfig, &[char]) -> bool;

/// Evaluation order. The first rule that fires decides the verdict.
pub const RULES: [(GarbageReason, RulePredicate); 6] = [
    (GarbageReason::TooLong, too_long),
    (GarbageReason::BadAlnumRatio, bad_alnum_ratio),
    (GarbageReason::RepeatedChar, repeated_char),
    (GarbageReason::BadVowelConsonantRatio, bad_vowel_consonant_ratio),
    (GarbageReason::TwoDistinctPunctuation, two_distinct_punctuation),
    (GarbageReason::UppercaseInLowercase, uppercase_in_lowercase),
];

/// Rule L: the string has more than `max_length` characters.
pub fn too_long(config: &RuleConfig, chars: &[char]) -> bool {
    chars.len() > config.max_length
}

/// Rule A: too few letters and digits for the string's length. The empty
/// string always fires.
pub fn bad_alnum_ratio(config: &RuleConfig, chars: &[char]) -> bool {
    match alnum_ratio(chars) {
        Some(ratio) => ratio < config.alnum_threshold(chars.len()),
        None => true,
    }
}

/// Rule R: some character repeats `max_identical_run` times in a row.
pub fn repeated_char(config: &RuleConfig, chars: &[char]) -> bool {
    longest_run(chars) >= config.max_identical_run
}

/// Rule V: vowels and consonants are out of balance, or one of them is
/// missing from a long enough string.
pub fn bad_vowel_consonant_ratio(config: &RuleConfig, chars: &[char]) -> bool {
    let counts = letter_counts(chars);

    match counts.ratio() {
        Some(ratio) => ratio < config.min_vowel_ratio || ratio > config.max_vowel_ratio,
        None if counts.vowels == 0 => counts.consonants > config.max_consonants_without_vowels,
        None => counts.vowels > config.max_vowels_without_consonants,
    }
}

/// Rule P: the interior holds two different punctuation characters.
pub fn two_distinct_punctuation(_config: &RuleConfig, chars: &[char]) -> bool {
    let puncts = interior_punctuation(chars, PUNCT_LEAD, PUNCT_TRAIL);

    match puncts.split_first() {
        Some((first, rest)) => rest.iter().any(|ch| ch != first),
        None => false,
    }
}

/// Rule C: a lowercase word has an uppercase letter inside it that does not
/// follow `.`, `-`, `'` or `/`.
pub fn uppercase_in_lowercase(config: &RuleConfig, chars: &[char]) -> bool {
    let (Some(first), Some(last)) = (chars.first(), chars.last()) else {
        return false;
    };
    if !first.is_lowercase() || !last.is_lowercase() {
        return false;
    }

    let middle = chars.get(1..chars.len() - 1).unwrap_or(&[]);
    middle.iter().enumerate().any(|(idx, ch)| {
        ch.is_uppercase()
            && !(idx > 0 && config.capital_exempt_after.contains(&middle[idx - 1]))
    })
}

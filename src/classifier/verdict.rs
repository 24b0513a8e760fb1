use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule that marked a string as garbage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GarbageReason {
    TooLong,
    BadAlnumRatio,
    RepeatedChar,
    BadVowelConsonantRatio,
    TwoDistinctPunctuation,
    UppercaseInLowercase,
}

impl GarbageReason {
    /// All reasons, in evaluation order
    pub const ALL: [GarbageReason; 6] = [
        GarbageReason::TooLong,
        GarbageReason::BadAlnumRatio,
        GarbageReason::RepeatedChar,
        GarbageReason::BadVowelConsonantRatio,
        GarbageReason::TwoDistinctPunctuation,
        GarbageReason::UppercaseInLowercase,
    ];

    /// One-letter rule code used in the Taghva et al. paper
    pub fn code(&self) -> char {
        match self {
            Self::TooLong => 'L',
            Self::BadAlnumRatio => 'A',
            Self::RepeatedChar => 'R',
            Self::BadVowelConsonantRatio => 'V',
            Self::TwoDistinctPunctuation => 'P',
            Self::UppercaseInLowercase => 'C',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TooLong => "longer than the maximum string length",
            Self::BadAlnumRatio => "too few alphanumeric characters",
            Self::RepeatedChar => "run of identical characters",
            Self::BadVowelConsonantRatio => "implausible vowel/consonant balance",
            Self::TwoDistinctPunctuation => "mixed punctuation inside the string",
            Self::UppercaseInLowercase => "uppercase letter inside a lowercase word",
        }
    }
}

impl fmt::Display for GarbageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of classifying one string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "rule", rename_all = "snake_case")]
pub enum Verdict {
    Clean,
    Garbage(GarbageReason),
}

impl Verdict {
    pub fn is_clean(&self) -> bool {
        matches!(self, Verdict::Clean)
    }

    pub fn is_garbage(&self) -> bool {
        !self.is_clean()
    }

    pub fn reason(&self) -> Option<GarbageReason> {
        match self {
            Verdict::Clean => None,
            Verdict::Garbage(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Clean => write!(f, "clean"),
            Verdict::Garbage(reason) => write!(f, "garbage ({}) {}", reason.code(), reason),
        }
    }
}

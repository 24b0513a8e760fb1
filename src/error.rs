use thiserror::Error;

/// Invalid tuning values in a cleaning configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_length must be > 0")]
    ZeroMaxLength,

    #[error("alnum threshold for {length} must be within [0,1], got {value}")]
    AlnumThresholdOutOfRange { length: usize, value: f64 },

    #[error("default_alnum_threshold must be within [0,1], got {0}")]
    DefaultAlnumThresholdOutOfRange(f64),

    #[error("max_identical_run must be >= 2, got {0}")]
    IdenticalRunTooShort(usize),

    #[error("vowel ratio bounds must satisfy 0 <= min ({min}) <= max ({max})")]
    VowelRatioBounds { min: f64, max: f64 },
}

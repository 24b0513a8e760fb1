// Library exports for the CLI and for callers embedding the filter

pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use classifier::{GarbageClassifier, GarbageReason, Verdict};
pub use config::{CleanConfig, Granularity, RuleConfig, SourceConfig};
pub use error::ConfigError;
pub use pipeline::{CleanedText, TextCleaner};

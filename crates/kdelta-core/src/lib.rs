//! kdelta core - field-path diffing for object snapshots
//!
//! Given two snapshots of an object (before and after an update) and a list
//! of selectors, reports whether the value behind any selector changed:
//!
//! - Selector language with nested fields, escapes, wildcards, indices,
//!   slices, recursive descent and filters
//! - Per-selector change classification with `<none>` for missing values
//! - Aggregation that runs every selector and collects every failure
//! - Byte-stable diff and error report text
//! - Structured error and logging facilities shared with the CLI

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod selector;
pub mod settings;

// Re-exported for the logging macros
#[doc(hidden)]
pub use kdelta_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use diff::{compute_report, diff, diff_field, diff_values, DiffError, DiffOutcome, DiffReport};
pub use errors::{ExError, ExErrorKind, Result};
pub use selector::{evaluate, EvaluationResult, Selector, SelectorSyntaxError};
pub use settings::{SettingsError, UpdateSetting};

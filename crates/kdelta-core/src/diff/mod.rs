//! Field-path diff engine.
//!
//! Compares two snapshots of an object through a configured list of
//! selectors and reports, per selector, whether the rendered value changed.
//!
//! ## Entry point
//!
//! ```
//! use kdelta_core::diff::diff_values;
//! use kdelta_core::UpdateSetting;
//! use serde_json::json;
//!
//! let old = json!({"status": {"replicas": 1}});
//! let new = json!({"status": {"replicas": 2}});
//! let settings = UpdateSetting::new(["status.replicas"], true);
//!
//! let text = diff_values(&old, &new, &settings).unwrap();
//! assert_eq!(text, "status.replicas:\n\t-: 1\n\t+: 2\n");
//! ```
//!
//! ## Guarantees
//!
//! - **Order**: selectors run in configured order; the first changed selector
//!   is the one reported.
//! - **Isolation**: a malformed selector never stops the others from running.
//! - **Errors win**: if any selector failed, the call fails with every
//!   failure listed, even when a change was found.
//! - **Missing is visible**: an absent or null value renders as `<none>`.

pub mod engine;
pub mod model;
pub mod report;

pub use engine::{compute_report, diff, diff_field, diff_values};
pub use model::{DiffError, DiffOutcome, DiffReport, FieldChange, FieldError, ObjectSide};
pub use report::{format_change, format_errors, ERROR_BANNER};

//! Text rendering for diff results.
//!
//! Both templates are byte-stable: consumers display them verbatim (for
//! example in chat notifications) and some parse the error banner.

use crate::diff::model::{FieldChange, FieldError};

/// Literal prefix of every aggregated diff error message.
pub const ERROR_BANNER: &str = "while getting diff: ";

/// Render a single change as a diff block.
///
/// ```text
/// spec.containers[*].image:
/// 	-: nginx:1.14
/// 	+: nginx:latest
/// ```
pub fn format_change(change: &FieldChange) -> String {
    format!(
        "{}:\n\t-: {}\n\t+: {}\n",
        change.path, change.old_rendered, change.new_rendered
    )
}

/// Render selector failures as one message, one bullet per failure in
/// selector order. No trailing newline.
pub fn format_errors(errors: &[FieldError]) -> String {
    let heading = match errors.len() {
        1 => "1 error occurred".to_string(),
        n => format!("{n} errors occurred"),
    };
    let bullets: String = errors.iter().map(|e| format!("\n\t* {e}")).collect();
    format!("{ERROR_BANNER}{heading}:{bullets}")
}

//! Diff output types.
//!
//! Errors are carried as structured `(selector, side, cause)` records and only
//! turned into text at the formatting boundary (see [`super::report`]).

use crate::diff::report;
use crate::selector::SelectorSyntaxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which snapshot a selector was being evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectSide {
    /// The snapshot before the update
    Old,
    /// The snapshot after the update
    New,
}

impl ObjectSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectSide::Old => "old",
            ObjectSide::New => "new",
        }
    }
}

impl fmt::Display for ObjectSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selector whose rendered value differs between the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// The selector text as configured
    pub path: String,
    /// Rendering in the old snapshot (`<none>` when absent)
    pub old_rendered: String,
    /// Rendering in the new snapshot (`<none>` when absent)
    pub new_rendered: String,
}

/// A selector that failed to evaluate.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("while finding value in {side} obj from jsonpath {selector:?}: {cause}")]
pub struct FieldError {
    pub selector: String,
    pub side: ObjectSide,
    #[source]
    pub cause: SelectorSyntaxError,
}

impl FieldError {
    pub fn new(selector: impl Into<String>, side: ObjectSide, cause: SelectorSyntaxError) -> Self {
        Self {
            selector: selector.into(),
            side,
            cause,
        }
    }
}

/// Classification of one selector (or of a whole selector list).
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOutcome {
    NoChange,
    Changed(FieldChange),
    Errors(Vec<FieldError>),
}

/// Everything a diff run observed, before the return contract is applied.
///
/// `changes` and `errors` are both in selector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    pub changes: Vec<FieldChange>,
    pub errors: Vec<FieldError>,
}

impl DiffReport {
    /// The change that would be reported: the earliest in selector order
    pub fn first_change(&self) -> Option<&FieldChange> {
        self.changes.first()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Collapse into the single-result form: an aggregated error if any
    /// selector failed, otherwise the first change's diff block, otherwise
    /// an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Fields`] when at least one selector failed, even
    /// if a change was also detected.
    pub fn into_text(self) -> Result<String, DiffError> {
        if !self.errors.is_empty() {
            return Err(DiffError::Fields(self.errors));
        }
        Ok(self
            .changes
            .first()
            .map(report::format_change)
            .unwrap_or_default())
    }

    /// Collapse into a [`DiffOutcome`] with the same precedence as [`Self::into_text`].
    pub fn into_outcome(mut self) -> DiffOutcome {
        if !self.errors.is_empty() {
            return DiffOutcome::Errors(self.errors);
        }
        if self.changes.is_empty() {
            DiffOutcome::NoChange
        } else {
            DiffOutcome::Changed(self.changes.swap_remove(0))
        }
    }
}

/// Failure of a whole diff call.
#[derive(Debug, Error)]
pub enum DiffError {
    /// One or more selectors failed; rendered with the aggregated banner
    #[error("{}", report::format_errors(.0))]
    Fields(Vec<FieldError>),

    /// A snapshot could not be converted into the canonical value tree
    #[error("while converting {side} obj: {source}")]
    Conversion {
        side: ObjectSide,
        #[source]
        source: serde_json::Error,
    },
}

impl DiffError {
    /// Per-selector failures, in selector order (empty for conversion failures)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            DiffError::Fields(errors) => errors,
            DiffError::Conversion { .. } => &[],
        }
    }
}

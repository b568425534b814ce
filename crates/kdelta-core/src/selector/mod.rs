//! Selector language.
//!
//! A selector names a location inside a structured object:
//!
//! - `status.replicas`: nested fields, `.` separated
//! - `other.annotations.app\.kubernetes\.io\/version`: `\` escapes a separator
//!   or any other character inside a key
//! - `metadata.annotations.deployment\.kubernetes\.io/revision`: a key runs to
//!   the next `.`, `[`, `,`, `$`, `@`, brace or whitespace, so `/` and `:` need
//!   no escape
//! - `spec.containers[*].image`: every element of a sequence, flattened
//! - `items[0]`, `items[-1]`, `items[1:3]`, `items[0,2]`: indices, slices, unions
//! - `labels['app.kubernetes.io/name']`: bracket-quoted keys
//! - `spec..image`, `data.*`: recursive descent and wildcards
//! - `containers[?(@.name == "web")].image`: filters
//!
//! Parsing is strict and evaluation is tolerant: malformed text fails with a
//! [`SelectorSyntaxError`], while a well-formed path that does not resolve
//! yields [`EvaluationResult::NotFound`].

pub mod ast;
pub mod eval;
pub mod parser;

pub use ast::Segment;
pub use eval::{string_form, EvaluationResult, NONE_SENTINEL};
pub use parser::{SelectorSyntaxError, SyntaxErrorKind};

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    source: String,
    segments: Vec<Segment>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorSyntaxError`] when the text is not a valid selector.
    pub fn parse(text: &str) -> Result<Self, SelectorSyntaxError> {
        let segments = parser::parse_segments(text)?;
        Ok(Self {
            source: text.to_string(),
            segments,
        })
    }

    /// The selector text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Evaluate against an object. Never mutates `object`.
    pub fn evaluate<'v>(&self, object: &'v Value) -> EvaluationResult<'v> {
        eval::evaluate_segments(&self.segments, object)
    }
}

impl FromStr for Selector {
    type Err = SelectorSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse `selector` and evaluate it against `object`.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] when `selector` is malformed. A selector
/// that does not resolve is not an error; it yields `NotFound`.
pub fn evaluate<'v>(
    object: &'v Value,
    selector: &str,
) -> Result<EvaluationResult<'v>, SelectorSyntaxError> {
    Ok(Selector::parse(selector)?.evaluate(object))
}

//! Selector evaluation against a `serde_json::Value` tree.
//!
//! Resolution is tolerant: a step that does not apply to the node it meets
//! (missing key, index out of range, key on a sequence, index on a map)
//! contributes nothing instead of failing. Only parsing can fail.

use super::ast::{CompareOp, Filter, Literal, Segment};
use serde_json::Value;
use std::cmp::Ordering;

/// Rendering of a value that a selector did not resolve to.
pub const NONE_SENTINEL: &str = "<none>";

/// Outcome of evaluating one selector against one object.
///
/// Values borrow from the evaluated object. Absent fields and explicit nulls
/// are both [`EvaluationResult::NotFound`].
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult<'v> {
    /// One or more non-null matches, in document order
    Found(Vec<&'v Value>),
    NotFound,
}

impl<'v> EvaluationResult<'v> {
    pub fn is_found(&self) -> bool {
        matches!(self, EvaluationResult::Found(_))
    }

    /// Canonical string rendering used both for comparison and display.
    ///
    /// `NotFound` renders as [`NONE_SENTINEL`]; multiple matches are joined
    /// with a single space.
    pub fn render(&self) -> String {
        match self {
            EvaluationResult::NotFound => NONE_SENTINEL.to_string(),
            EvaluationResult::Found(values) => values
                .iter()
                .map(|v| string_form(v))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// String form of a single value: strings raw, everything else as compact JSON.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Apply `segments` to `root`, returning every match including nulls.
pub(crate) fn select<'v>(segments: &[Segment], root: &'v Value) -> Vec<&'v Value> {
    let mut current = vec![root];
    for segment in segments {
        let mut next = Vec::new();
        for node in current {
            apply(segment, node, &mut next);
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

/// Evaluate parsed segments, dropping nulls from the match set.
pub(crate) fn evaluate_segments<'v>(segments: &[Segment], root: &'v Value) -> EvaluationResult<'v> {
    let values: Vec<&Value> = select(segments, root)
        .into_iter()
        .filter(|v| !v.is_null())
        .collect();
    if values.is_empty() {
        EvaluationResult::NotFound
    } else {
        EvaluationResult::Found(values)
    }
}

fn apply<'v>(segment: &Segment, node: &'v Value, out: &mut Vec<&'v Value>) {
    match segment {
        Segment::Key(key) => {
            if let Some(child) = node.as_object().and_then(|map| map.get(key)) {
                out.push(child);
            }
        }
        Segment::Wildcard => match node {
            Value::Array(items) => out.extend(items.iter()),
            Value::Object(map) => out.extend(map.values()),
            _ => {}
        },
        Segment::Index(index) => {
            if let Some(item) = node
                .as_array()
                .and_then(|items| resolve_index(*index, items.len()).and_then(|i| items.get(i)))
            {
                out.push(item);
            }
        }
        Segment::Slice { start, end, step } => {
            if let Some(items) = node.as_array() {
                let len = items.len();
                let from = clamp_bound(start.unwrap_or(0), len);
                let to = end.map_or(len, |e| clamp_bound(e, len));
                let step = step.map_or(1, |s| usize::try_from(s).unwrap_or(1).max(1));
                if from < to {
                    out.extend(items[from..to].iter().step_by(step));
                }
            }
        }
        Segment::Union(members) => {
            for member in members {
                apply(&member.clone().into_segment(), node, out);
            }
        }
        Segment::Descend(inner) => {
            let mut stack = vec![node];
            while let Some(current) = stack.pop() {
                apply(inner, current, out);
                // Push children in reverse so they are visited in document order
                match current {
                    Value::Array(items) => stack.extend(items.iter().rev()),
                    Value::Object(map) => {
                        let children: Vec<&Value> = map.values().collect();
                        stack.extend(children.into_iter().rev());
                    }
                    _ => {}
                }
            }
        }
        Segment::Filter(filter) => {
            if let Some(items) = node.as_array() {
                out.extend(items.iter().filter(|item| filter_matches(filter, item)));
            }
        }
    }
}

/// Resolve a possibly negative index against a sequence length.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Normalize a slice bound into `0..=len`.
fn clamp_bound(bound: i64, len: usize) -> usize {
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if bound < 0 { signed_len + bound } else { bound };
    usize::try_from(resolved.clamp(0, signed_len)).unwrap_or(len)
}

fn filter_matches(filter: &Filter, item: &Value) -> bool {
    let matches = select(&filter.path, item);
    match &filter.predicate {
        None => matches.iter().any(|v| !v.is_null()),
        Some((op, literal)) => matches.iter().any(|v| compare(v, *op, literal)),
    }
}

fn compare(value: &Value, op: CompareOp, literal: &Literal) -> bool {
    let ordering = match (value, literal) {
        (Value::String(a), Literal::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Number(a), Literal::Number(b)) => a.as_f64().and_then(|a| a.partial_cmp(b)),
        (Value::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Literal::Null) => Some(Ordering::Equal),
        _ => None,
    };

    match (op, ordering) {
        (CompareOp::Eq, Some(o)) => o == Ordering::Equal,
        (CompareOp::Ne, Some(o)) => o != Ordering::Equal,
        (CompareOp::Ne, None) => true,
        (CompareOp::Lt, Some(o)) => o == Ordering::Less,
        (CompareOp::Le, Some(o)) => o != Ordering::Greater,
        (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
        (CompareOp::Ge, Some(o)) => o != Ordering::Less,
        (_, None) => false,
    }
}

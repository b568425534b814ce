//! Typed syntax tree for parsed selectors.

/// One step of a selector path.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// `.name`, `['name']`
    Key(String),
    /// `.*`, `[*]`: every element of a sequence or every value of a map
    Wildcard,
    /// `[n]`; negative indices count from the end
    Index(i64),
    /// `[start:end:step]`
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// `[0,2]`, `['a','b']`
    Union(Vec<UnionMember>),
    /// `..<segment>`: the inner segment applied to a node and all of its descendants
    Descend(Box<Segment>),
    /// `[?(@.path)]`, `[?(@.path == literal)]`
    Filter(Filter),
}

/// A single member of a bracket union.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionMember {
    Key(String),
    Index(i64),
}

impl UnionMember {
    pub(crate) fn into_segment(self) -> Segment {
        match self {
            UnionMember::Key(key) => Segment::Key(key),
            UnionMember::Index(index) => Segment::Index(index),
        }
    }
}

/// Filter predicate applied to each element of a sequence.
///
/// `path` is relative to the element (`@`). Without a comparison the filter
/// keeps elements where the path resolves to at least one non-null value.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub path: Vec<Segment>,
    pub predicate: Option<(CompareOp, Literal)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Right-hand side of a filter comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

use crate::diff::model::{DiffError, FieldError};
use crate::kdelta_core_types::schema::{OP_DIFF, OP_LOAD_SETTINGS};
use crate::selector::SelectorSyntaxError;
use crate::settings::SettingsError;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions, and external reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A selector is not valid selector syntax
    SelectorSyntax,
    /// A diff call failed because one or more selectors failed
    DiffFailed,
    /// A snapshot could not be converted into a value tree
    Conversion,
    /// Settings could not be parsed or have an unsupported format
    InvalidSettings,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::SelectorSyntax => "ERR_SELECTOR_SYNTAX",
            ExErrorKind::DiffFailed => "ERR_DIFF_FAILED",
            ExErrorKind::Conversion => "ERR_CONVERSION",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Domain errors (`SelectorSyntaxError`, `DiffError`, `SettingsError`) convert
/// into this type at logging and process boundaries, where a stable code is
/// needed alongside the message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    selector: Option<String>,
    message: String,
    error_count: Option<usize>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            selector: None,
            message: String::new(),
            error_count: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the selector that failed
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the number of underlying failures (aggregated errors)
    pub fn with_error_count(mut self, count: usize) -> Self {
        self.error_count = Some(count);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_count(&self) -> Option<usize> {
        self.error_count
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(selector) = &self.selector {
            write!(f, " (selector: {})", selector)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== Conversions ==========

impl From<&SelectorSyntaxError> for ExError {
    fn from(err: &SelectorSyntaxError) -> Self {
        ExError::new(ExErrorKind::SelectorSyntax)
            .with_selector(err.selector())
            .with_message(err.to_string())
    }
}

impl From<SelectorSyntaxError> for ExError {
    fn from(err: SelectorSyntaxError) -> Self {
        ExError::from(&err)
    }
}

impl From<&FieldError> for ExError {
    fn from(err: &FieldError) -> Self {
        ExError::new(ExErrorKind::SelectorSyntax)
            .with_selector(err.selector.clone())
            .with_message(err.to_string())
    }
}

impl From<&DiffError> for ExError {
    fn from(err: &DiffError) -> Self {
        match err {
            DiffError::Fields(errors) => ExError::new(ExErrorKind::DiffFailed)
                .with_op(OP_DIFF)
                .with_error_count(errors.len())
                .with_message(err.to_string()),
            DiffError::Conversion { .. } => ExError::new(ExErrorKind::Conversion)
                .with_op(OP_DIFF)
                .with_message(err.to_string()),
        }
    }
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        ExError::from(&err)
    }
}

impl From<&SettingsError> for ExError {
    fn from(err: &SettingsError) -> Self {
        let kind = match err {
            SettingsError::Io { .. } => ExErrorKind::Io,
            _ => ExErrorKind::InvalidSettings,
        };
        ExError::new(kind)
            .with_op(OP_LOAD_SETTINGS)
            .with_message(err.to_string())
    }
}

impl From<SettingsError> for ExError {
    fn from(err: SettingsError) -> Self {
        ExError::from(&err)
    }
}

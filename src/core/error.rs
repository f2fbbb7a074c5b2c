use thiserror::Error;

/// Errors that can occur while building or preparing a commercial document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactureError {
    /// A line item, payment or document field is malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// One or more document-level checks failed.
    #[error("document invalid: {0}")]
    Document(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// A single validation error with field path and message.
///
/// This is the only hard failure of the totals calculator: a document whose
/// lines produce one is never rendered with partial totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines[2].vat_rate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Short rule identifier if applicable (e.g. "LINE-QTY").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error tagged with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

/// Join several validation errors into one [`FactureError::Document`].
pub(crate) fn join_errors(errors: &[ValidationError]) -> FactureError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    FactureError::Document(msg)
}

use thiserror::Error;

/// Errors that can occur while applying a header-skip rule.
#[derive(Debug, Error)]
pub enum TransformError {
    /// I/O error on the input or output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule itself is unusable (e.g. missing start offset)
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// The stream violates the rule's integrity preconditions
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The transform succeeded but produced no bytes
    #[error("Transform produced empty output")]
    EmptyOutput,
}

impl TransformError {
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRule(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}

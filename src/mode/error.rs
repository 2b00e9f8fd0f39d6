use thiserror::Error;

/// Errors raised by [`Mode`](super::Mode) construction and manipulation.
///
/// Every failing call leaves the mode exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModeError {
    #[error("unrecognized mode arguments: {0}")]
    Construction(String),

    #[error("a list mode needs at least 2 labels, got {0}")]
    TooFewLabels(usize),

    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("unrecognized value for mode: {0}")]
    UnrecognizedValue(String),

    #[error("unknown mode value: {0}")]
    UnknownLabel(String),

    #[error("description must be text, got {0}")]
    NotText(String),

    #[error("invalid mode arguments: {0}")]
    InvalidArgs(String),
}

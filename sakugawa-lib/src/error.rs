//! Error types for stylesheet splitting.

/// Result type alias for splitting operations.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors raised before any parsing takes place.
///
/// Malformed CSS is never an error: the tokenizer passes anything it does not
/// understand through as an opaque rule. Only caller contract violations end up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// The styles or the options handed to the splitter are unusable.
    #[error("{0}")]
    InvalidInput(String),
}

impl SplitError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

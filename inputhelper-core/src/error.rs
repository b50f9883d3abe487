//! Errors that can escape a [`Terminal`](crate::utils::Terminal) call.
//!
//! Bad answers never show up here: they are reported to the user and the
//! question is asked again. Only a broken or exhausted stream ends a call
//! early.

use thiserror::Error;

/// Result type alias for prompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading the answer or writing the prompt failed
    #[error("Couldn't read line: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream ended before a valid answer was given
    #[error("Input closed before a valid answer was given")]
    InputClosed,
}

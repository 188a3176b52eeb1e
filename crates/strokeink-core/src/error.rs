//! Error types shared by the editor core.

use thiserror::Error;

/// Errors produced by editor operations.
///
/// Every failing operation leaves the document, style state and history
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// An input transition was requested in the wrong tracker state.
    #[error("input state error: cannot {operation} while {state}")]
    InputState {
        operation: &'static str,
        state: &'static str,
    },
    /// An element, point or history index was out of range.
    #[error("index error: {what} index {index} out of range (len {len})")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// An import payload was corrupt or of an incompatible version.
    #[error("format error: {0}")]
    Format(String),
    /// A style setter received an invalid value.
    #[error("style validation error: {0}")]
    StyleValidation(String),
    /// A well-indexed edit that cannot be applied to its target.
    #[error("edit rejected: {0}")]
    Edit(String),
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl EditorError {
    pub(crate) fn input_state(operation: &'static str, state: &'static str) -> Self {
        Self::InputState { operation, state }
    }

    pub(crate) fn element_index(index: usize, len: usize) -> Self {
        Self::Index {
            what: "element",
            index,
            len,
        }
    }

    pub(crate) fn point_index(index: usize, len: usize) -> Self {
        Self::Index {
            what: "point",
            index,
            len,
        }
    }

    /// Whether the error is recovered locally (ignored and surfaced as a notice).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InputState { .. } | Self::StyleValidation(_) | Self::Edit(_)
        )
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

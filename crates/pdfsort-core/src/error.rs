use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("Item index {index} out of bounds for list of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Rendering failed: {0}")]
    Surface(String),
}

impl SortError {
    /// Wrap a rendering backend failure.
    pub fn surface<E: Debug>(err: E) -> Self {
        SortError::Surface(format!("{:?}", err))
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SortError::InvalidOption {
            field,
            reason: reason.into(),
        }
    }
}

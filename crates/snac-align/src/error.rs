//! Error types for the alignment workflow.

use snac_client::ClientError;
use snac_map::MappingError;
use thiserror::Error;

/// Errors surfaced by the alignment workflow.
///
/// Missing required fields are not errors; they are reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AlignError {
    /// Host communication failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A mapping edit was rejected.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Save requested while the mapping is clean or has warnings.
    #[error("mapping cannot be saved: {0}")]
    CannotSave(&'static str),

    /// Upload or validation requested without a saved schema.
    #[error("no schema has been saved for this project")]
    NoSavedSchema,

    /// Upload or validation requested without an API key.
    #[error("no API key configured for the '{0}' environment")]
    MissingApiKey(String),
}

impl AlignError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Client(e) => e.user_message(),
            Self::Mapping(_) => "That field cannot be assigned to this column.",
            Self::CannotSave(reason) => reason,
            Self::NoSavedSchema => "Save a schema before starting this job.",
            Self::MissingApiKey(_) => "Set an API key in the preferences before starting this job.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for alignment operations.
pub type Result<T> = std::result::Result<T, AlignError>;

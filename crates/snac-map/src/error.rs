//! Error types for alignment state operations.

use snac_model::SchemaType;
use thiserror::Error;

/// Errors from alignment state operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field is not part of the active schema type.
    #[error("Field not found in {schema_type} schema: {field}")]
    FieldNotFound {
        schema_type: SchemaType,
        field: String,
    },
    /// Column is not part of the local dataset.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// `end_update` called without a matching `begin_update`.
    #[error("Batch update ended without being started")]
    UnbalancedBatch,
}

pub type Result<T> = std::result::Result<T, MappingError>;

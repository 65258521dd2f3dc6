use thiserror::Error;

use crate::schema::SchemaType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unrecognized schema type: [{0}]")]
    UnknownSchemaType(String),
    #[error("duplicate {schema_type} field: {name}")]
    DuplicateField {
        schema_type: SchemaType,
        name: String,
    },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

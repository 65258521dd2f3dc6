pub mod catalog;
pub mod error;
pub mod field;
pub mod mapping;
pub mod model;
pub mod schema;
pub mod warning;

pub use error::{ModelError, Result};
pub use field::{FieldRelation, FieldVocabulary, RelationKind, SchemaFieldDescriptor};
pub use mapping::ColumnMapping;
pub use model::SchemaModel;
pub use schema::{SchemaType, SchemaTypeInfo};
pub use warning::{MISSING_REQUIRED_FIELD, Warning};

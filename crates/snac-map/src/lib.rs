//! Column-to-field alignment state, suggestions and migration.
#![deny(unsafe_code)]

pub mod error;
pub mod migrate;
pub mod state;
pub mod suggest;

pub use error::{MappingError, Result};
pub use migrate::{MigrationReport, migrate_mapping};
pub use state::{AlignmentState, ColumnAssignment};
pub use suggest::{DEFAULT_MIN_CONFIDENCE, Suggestion, SuggestionEngine, normalize_text};

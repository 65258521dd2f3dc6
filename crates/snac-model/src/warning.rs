use serde::{Deserialize, Serialize};

/// Title used for every unmet-requirement warning.
pub const MISSING_REQUIRED_FIELD: &str = "Missing Required Field";

/// A non-fatal, user-facing problem with the working mapping.
///
/// Warnings are data: they are rendered in the warnings panel and gate the
/// save action, but are never raised as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub title: String,
    pub field: String,
    pub body: String,
}

impl Warning {
    /// Warning for a required field no column maps to.
    pub fn missing_required_field(field: &str) -> Self {
        Self {
            title: MISSING_REQUIRED_FIELD.to_string(),
            field: field.to_string(),
            body: format!("The {field} field must be assigned to a column."),
        }
    }
}

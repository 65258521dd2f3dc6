//! Column-to-field mapping as stored on the host project.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::SchemaModel;
use crate::schema::SchemaType;

/// Association of local dataset columns with schema fields.
///
/// Serialized with the camelCase keys the host keeps in the project's
/// overlay model. Columns absent from `column_mappings` are unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    #[serde(default)]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub column_mappings: BTreeMap<String, String>,
}

impl ColumnMapping {
    /// Empty mapping for a schema type.
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            column_mappings: BTreeMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures.
    #[must_use]
    pub fn with(mut self, column: &str, field: &str) -> Self {
        self.column_mappings
            .insert(column.to_string(), field.to_string());
        self
    }

    /// Field mapped to `column`, if any.
    pub fn field_for(&self, column: &str) -> Option<&str> {
        self.column_mappings.get(column).map(String::as_str)
    }

    /// Column currently mapped to `field` (exact match).
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.column_mappings
            .iter()
            .find(|(_, f)| f.as_str() == field)
            .map(|(c, _)| c.as_str())
    }

    /// True if some column maps to `field`.
    pub fn is_field_mapped(&self, field: &str) -> bool {
        self.column_for(field).is_some()
    }

    /// Mapped field names, one per mapped column.
    pub fn mapped_fields(&self) -> impl Iterator<Item = &str> {
        self.column_mappings.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.column_mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_mappings.is_empty()
    }

    /// Entries whose field is not part of the active schema type.
    ///
    /// These are kept (they become live again if the type switches back) but
    /// take no part in validation or preview.
    pub fn inert_entries<'a>(&'a self, model: &'a SchemaModel) -> Vec<(&'a str, &'a str)> {
        self.column_mappings
            .iter()
            .filter(|(_, field)| model.field(self.schema_type, field).is_none())
            .map(|(c, f)| (c.as_str(), f.as_str()))
            .collect()
    }
}

//! The schema model: ordered field descriptors per schema type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::SchemaFieldDescriptor;
use crate::schema::SchemaType;

/// Field descriptors for every schema type, as served by the host.
///
/// The wire form is an object keyed by schema type name
/// (`resource`, `constellation`, `relation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    resource: Vec<SchemaFieldDescriptor>,
    #[serde(default, rename = "constellation", alias = "entity")]
    entity: Vec<SchemaFieldDescriptor>,
    #[serde(default)]
    relation: Vec<SchemaFieldDescriptor>,
}

impl SchemaModel {
    /// Builds a model from per-type field lists, rejecting duplicate names.
    pub fn new(
        resource: Vec<SchemaFieldDescriptor>,
        entity: Vec<SchemaFieldDescriptor>,
        relation: Vec<SchemaFieldDescriptor>,
    ) -> Result<Self> {
        let model = Self {
            resource,
            entity,
            relation,
        };
        model.check_unique_names()?;
        Ok(model)
    }

    pub(crate) fn from_parts(
        resource: Vec<SchemaFieldDescriptor>,
        entity: Vec<SchemaFieldDescriptor>,
        relation: Vec<SchemaFieldDescriptor>,
    ) -> Self {
        Self {
            resource,
            entity,
            relation,
        }
    }

    /// Ensures field names are unique within each schema type.
    pub fn check_unique_names(&self) -> Result<()> {
        for schema_type in SchemaType::ALL {
            let mut seen = HashSet::new();
            for field in self.fields(schema_type) {
                if !seen.insert(field.name.to_ascii_lowercase()) {
                    return Err(ModelError::DuplicateField {
                        schema_type,
                        name: field.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Ordered field list for a schema type.
    pub fn fields(&self, schema_type: SchemaType) -> &[SchemaFieldDescriptor] {
        match schema_type {
            SchemaType::Resource => &self.resource,
            SchemaType::Entity => &self.entity,
            SchemaType::Relation => &self.relation,
        }
    }

    /// Field names of a schema type in declaration order.
    pub fn field_names(&self, schema_type: SchemaType) -> Vec<&str> {
        self.fields(schema_type)
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Looks up a field by its current name (case-insensitive).
    pub fn field(&self, schema_type: SchemaType, name: &str) -> Option<&SchemaFieldDescriptor> {
        self.fields(schema_type)
            .iter()
            .find(|f| f.is_current_name(name))
    }

    /// Looks up a field by current or previous name.
    pub fn resolve_field(
        &self,
        schema_type: SchemaType,
        name: &str,
    ) -> Option<&SchemaFieldDescriptor> {
        self.field(schema_type, name).or_else(|| {
            self.fields(schema_type)
                .iter()
                .find(|f| f.is_previous_name(name))
        })
    }

    /// Required field names in declaration order.
    pub fn required_fields(&self, schema_type: SchemaType) -> Vec<&str> {
        self.fields(schema_type)
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// True if the model carries no fields at all.
    pub fn is_empty(&self) -> bool {
        SchemaType::ALL
            .iter()
            .all(|t| self.fields(*t).is_empty())
    }
}

//! Field descriptors of the SNAC schema.

use serde::{Deserialize, Serialize};

/// Vocabulary a field's values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldVocabulary {
    #[serde(rename = "SNAC Controlled Vocabulary")]
    Controlled,
    #[serde(rename = "Free Text")]
    FreeText,
    #[serde(rename = "Numeric SNAC Identifier")]
    Identifier,
}

/// Strength of a relation between two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Required,
    Optional,
}

/// A field that must (or may) accompany another field in the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRelation {
    pub field: String,
    pub relation: RelationKind,
}

/// One field of a schema type.
///
/// Only `name`, `required` and `tooltip` drive alignment; the remaining
/// metadata is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFieldDescriptor {
    /// Current field name, unique within its schema type.
    pub name: String,
    /// Whether a column must be mapped to this field before saving.
    #[serde(default)]
    pub required: bool,
    /// Help text shown next to the field.
    #[serde(default)]
    pub tooltip: String,
    /// Names the field was known by in earlier schema revisions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_names: Vec<String>,
    /// Whether several values may appear per record.
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<FieldVocabulary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<FieldRelation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<FieldRelation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
}

impl SchemaFieldDescriptor {
    /// Creates a descriptor with no optional metadata.
    pub fn new(name: impl Into<String>, required: bool, tooltip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required,
            tooltip: tooltip.into(),
            previous_names: Vec::new(),
            repeatable: false,
            vocabulary: None,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            sample_values: Vec::new(),
            default_value: String::new(),
        }
    }

    #[must_use]
    pub fn with_previous_names(mut self, names: &[&str]) -> Self {
        self.previous_names = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: FieldVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// True if `name` is the field's current name (case-insensitive).
    pub fn is_current_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// True if `name` is one of the field's previous names.
    pub fn is_previous_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.previous_names
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
    }

    /// True if `name` refers to this field under any name.
    pub fn is_known_name(&self, name: &str) -> bool {
        self.is_current_name(name) || self.is_previous_name(name)
    }
}

//! Warnings for SNAC column mappings and the save gate built on them.
#![deny(unsafe_code)]

use serde::Serialize;
use snac_model::{ColumnMapping, SchemaModel, Warning};
use tracing::trace;

/// One warning per required field of the active type that no column maps to.
///
/// Warnings follow the declaration order of the schema type's fields.
pub fn validate(mapping: &ColumnMapping, model: &SchemaModel) -> Vec<Warning> {
    let warnings: Vec<Warning> = model
        .required_fields(mapping.schema_type)
        .into_iter()
        .filter(|field| !mapping.is_field_mapped(field))
        .map(Warning::missing_required_field)
        .collect();
    trace!(
        schema_type = %mapping.schema_type,
        warnings = warnings.len(),
        "validated mapping"
    );
    warnings
}

/// Save is enabled iff the mapping has unsaved edits and no warnings.
pub fn can_save(warnings: &[Warning], dirty: bool) -> bool {
    dirty && warnings.is_empty()
}

/// Validation outcome bundled for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<Warning>,
    /// Required fields of the active type, in declaration order.
    pub required: Vec<String>,
}

impl ValidationReport {
    pub fn new(mapping: &ColumnMapping, model: &SchemaModel) -> Self {
        Self {
            warnings: validate(mapping, model),
            required: model
                .required_fields(mapping.schema_type)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of required fields that are mapped.
    pub fn satisfied(&self) -> usize {
        self.required.len() - self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use snac_model::{SchemaFieldDescriptor, SchemaType};

    use super::*;

    fn model() -> SchemaModel {
        SchemaModel::new(
            vec![
                SchemaFieldDescriptor::new("Title", true, ""),
                SchemaFieldDescriptor::new("Abstract", false, ""),
                SchemaFieldDescriptor::new("Resource URL", true, ""),
            ],
            vec![SchemaFieldDescriptor::new("CPF Type", true, "")],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn missing_url_yields_one_warning() {
        let mapping = ColumnMapping::new(SchemaType::Resource).with("col1", "Title");
        let warnings = validate(&mapping, &model());
        assert_eq!(warnings, vec![Warning::missing_required_field("Resource URL")]);
    }

    #[test]
    fn warnings_follow_declaration_order() {
        let mapping = ColumnMapping::new(SchemaType::Resource);
        let fields: Vec<_> = validate(&mapping, &model())
            .into_iter()
            .map(|w| w.field)
            .collect();
        assert_eq!(fields, vec!["Title", "Resource URL"]);
    }

    #[test]
    fn only_active_type_is_checked() {
        let mapping = ColumnMapping::new(SchemaType::Relation).with("a", "Title");
        assert!(validate(&mapping, &model()).is_empty());

        let mapping = ColumnMapping::new(SchemaType::Entity).with("a", "Title");
        assert_eq!(validate(&mapping, &model()).len(), 1);
    }

    #[test]
    fn save_gate() {
        let warning = Warning::missing_required_field("Title");
        assert!(can_save(&[], true));
        assert!(!can_save(&[], false));
        assert!(!can_save(&[warning.clone()], true));
        assert!(!can_save(&[warning], false));
    }

    #[test]
    fn report_counts_satisfied_fields() {
        let mapping = ColumnMapping::new(SchemaType::Resource).with("col1", "Title");
        let report = ValidationReport::new(&mapping, &model());
        assert!(!report.is_valid());
        assert_eq!(report.satisfied(), 1);
        assert_eq!(report.required, vec!["Title", "Resource URL"]);
    }
}

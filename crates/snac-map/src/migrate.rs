//! Rewriting saved mappings that use renamed fields.

use serde::Serialize;
use snac_model::{ColumnMapping, SchemaModel};
use tracing::info;

/// Outcome of [`migrate_mapping`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// `(column, previous name, current name)` for every rewritten entry.
    pub renamed: Vec<(String, String, String)>,
    /// `(column, field)` entries no field of the active type knows.
    pub unrecognized: Vec<(String, String)>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty()
    }
}

/// Returns `mapping` with previous field names replaced by current ones.
///
/// Only the active schema type is consulted. Entries that match neither a
/// current nor a previous name are kept as-is and reported.
pub fn migrate_mapping(
    mapping: &ColumnMapping,
    model: &SchemaModel,
) -> (ColumnMapping, MigrationReport) {
    let mut migrated = mapping.clone();
    let mut report = MigrationReport::default();

    for (column, field) in &mapping.column_mappings {
        match model.resolve_field(mapping.schema_type, field) {
            Some(descriptor) if descriptor.name != *field => {
                report.renamed.push((
                    column.clone(),
                    field.clone(),
                    descriptor.name.clone(),
                ));
                migrated
                    .column_mappings
                    .insert(column.clone(), descriptor.name.clone());
            }
            Some(_) => {}
            None => report.unrecognized.push((column.clone(), field.clone())),
        }
    }

    if !report.is_noop() {
        info!(
            schema_type = %mapping.schema_type,
            renamed = report.renamed.len(),
            "migrated previous field names"
        );
    }
    (migrated, report)
}

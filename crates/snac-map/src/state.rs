//! Alignment state for the interactive mapping workflow.
//!
//! [`AlignmentState`] holds the last-saved mapping and the working copy the
//! user edits. All mutations go through explicit setters; consumers observe
//! changes through [`AlignmentState::revision`], which advances once per
//! change notification. Bulk edits are wrapped in a batch scope so they
//! produce a single notification.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use snac_model::{ColumnMapping, SchemaModel, SchemaType};
use tracing::{debug, trace};

use crate::error::{MappingError, Result};
use crate::migrate::{MigrationReport, migrate_mapping};
use crate::suggest::Suggestion;

/// Working and last-saved column mapping for one alignment panel.
#[derive(Debug, Clone)]
pub struct AlignmentState {
    model: Arc<SchemaModel>,
    /// Local dataset columns in display order.
    columns: Vec<String>,
    original: ColumnMapping,
    working: ColumnMapping,
    dirty: bool,
    batch_depth: usize,
    pending_notification: bool,
    revision: u64,
}

/// One dataset column and the field it currently maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment<'a> {
    pub column: &'a str,
    pub field: Option<&'a str>,
}

impl AlignmentState {
    /// Creates a state seeded with the empty default mapping.
    pub fn new(model: Arc<SchemaModel>, columns: Vec<String>) -> Self {
        let mut state = Self {
            model,
            columns,
            original: ColumnMapping::default(),
            working: ColumnMapping::default(),
            dirty: false,
            batch_depth: 0,
            pending_notification: false,
            revision: 0,
        };
        state.reset(None);
        state
    }

    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Replaces the dataset column list (the host owns it).
    pub fn set_columns(&mut self, columns: Vec<String>) {
        if self.columns != columns {
            self.columns = columns;
            self.notify();
        }
    }

    /// Last persisted mapping.
    pub fn original(&self) -> &ColumnMapping {
        &self.original
    }

    /// Mapping being edited.
    pub fn working(&self) -> &ColumnMapping {
        &self.working
    }

    pub fn schema_type(&self) -> SchemaType {
        self.working.schema_type
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of change notifications delivered so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True while inside a batch scope.
    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    /// Resets both mappings from `seed`, or to an empty resource mapping.
    ///
    /// Clears the dirty flag.
    pub fn reset(&mut self, seed: Option<&ColumnMapping>) {
        let seed = self.canonicalize(seed.cloned().unwrap_or_default());
        debug!(
            schema_type = %seed.schema_type,
            mappings = seed.len(),
            "resetting alignment state"
        );
        self.working = seed.clone();
        self.original = seed;
        self.dirty = false;
        self.notify();
    }

    /// Records a confirmed save: `saved` becomes the new baseline.
    ///
    /// Edits made while the save was in flight stay in the working copy and
    /// keep the state dirty.
    pub fn commit(&mut self, saved: ColumnMapping) {
        self.original = self.canonicalize(saved);
        self.refresh_dirty();
        self.notify();
    }

    /// Sets or clears the field mapped to `column`.
    ///
    /// Assigning a field already held by another column un-assigns it from
    /// that column first (last writer wins). Returns whether the working
    /// mapping changed.
    pub fn set_field_for_column(&mut self, column: &str, field: Option<&str>) -> Result<bool> {
        if !self.columns.iter().any(|c| c == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }

        let changed = match field {
            None => self.working.column_mappings.remove(column).is_some(),
            Some(name) => {
                let schema_type = self.working.schema_type;
                let canonical = self
                    .model
                    .field(schema_type, name)
                    .map(|f| f.name.clone())
                    .ok_or_else(|| MappingError::FieldNotFound {
                        schema_type,
                        field: name.to_string(),
                    })?;

                if self.working.field_for(column) == Some(canonical.as_str()) {
                    false
                } else {
                    let previous_holders: Vec<String> = self
                        .working
                        .column_mappings
                        .iter()
                        .filter(|(c, f)| c.as_str() != column && **f == canonical)
                        .map(|(c, _)| c.clone())
                        .collect();
                    for holder in previous_holders {
                        trace!(column = %holder, field = %canonical, "un-assigning field");
                        self.working.column_mappings.remove(&holder);
                    }
                    self.working
                        .column_mappings
                        .insert(column.to_string(), canonical);
                    true
                }
            }
        };

        if changed {
            debug!(column, field = ?field, "column mapping changed");
            self.refresh_dirty();
            self.notify();
        }
        Ok(changed)
    }

    /// Switches the active schema type, keeping existing column mappings.
    pub fn set_schema_type(&mut self, schema_type: SchemaType) -> bool {
        if self.working.schema_type == schema_type {
            return false;
        }
        debug!(from = %self.working.schema_type, to = %schema_type, "schema type changed");
        self.working.schema_type = schema_type;
        self.refresh_dirty();
        self.notify();
        true
    }

    /// Dataset columns with their current field, in column order.
    pub fn assignments(&self) -> Vec<ColumnAssignment<'_>> {
        self.columns
            .iter()
            .map(|c| ColumnAssignment {
                column: c.as_str(),
                field: self.working.field_for(c),
            })
            .collect()
    }

    /// Field names of the active type that some column maps to.
    pub fn used_fields(&self) -> Vec<&str> {
        self.model
            .field_names(self.schema_type())
            .into_iter()
            .filter(|f| self.working.is_field_mapped(f))
            .collect()
    }

    /// Column currently holding `field`, if any.
    pub fn column_for_field(&self, field: &str) -> Option<&str> {
        self.working.column_for(field)
    }

    /// Field options for `column` with their disabled flag.
    ///
    /// A field is disabled when another column already holds it.
    pub fn available_fields(&self, column: &str) -> Vec<(&str, bool)> {
        self.model
            .field_names(self.schema_type())
            .into_iter()
            .map(|f| (f, self.is_field_taken(f, column)))
            .collect()
    }

    /// True if `field` is held by a column other than `column`.
    ///
    /// Such options are disabled in `column`'s field selector.
    pub fn is_field_taken(&self, field: &str, column: &str) -> bool {
        self.working
            .column_for(field)
            .is_some_and(|holder| holder != column)
    }

    /// Assigns suggested fields to columns that are still unmapped.
    ///
    /// Runs as a single batch; fields already in use are skipped.
    pub fn apply_suggestions(&mut self, suggestions: &[Suggestion]) -> usize {
        self.batch(|state| {
            let mut applied = 0;
            for suggestion in suggestions {
                if state.working.field_for(&suggestion.column).is_some()
                    || state.working.is_field_mapped(&suggestion.field)
                {
                    continue;
                }
                if let Ok(true) =
                    state.set_field_for_column(&suggestion.column, Some(&suggestion.field))
                {
                    applied += 1;
                }
            }
            applied
        })
    }

    /// Rewrites previous field names in the working mapping to current ones.
    pub fn migrate_field_names(&mut self) -> MigrationReport {
        let (migrated, report) = migrate_mapping(&self.working, &self.model);
        if migrated != self.working {
            self.working = migrated;
            self.refresh_dirty();
            self.notify();
        }
        report
    }

    /// Opens a batch scope; notifications are deferred until it closes.
    pub fn begin_update(&mut self) {
        self.batch_depth += 1;
    }

    /// Closes a batch scope.
    ///
    /// Returns `true` if closing the outermost scope delivered a deferred
    /// notification.
    pub fn end_update(&mut self) -> Result<bool> {
        if self.batch_depth == 0 {
            return Err(MappingError::UnbalancedBatch);
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.pending_notification {
            self.pending_notification = false;
            self.revision += 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Runs `f` inside a batch scope.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_update();
        let result = f(self);
        // begin_update above guarantees the scope is open.
        let _ = self.end_update();
        result
    }

    /// Rewrites field names to the model's spelling and keeps one column per
    /// field of the active type.
    ///
    /// Names no schema type knows are left as they are. When several columns
    /// hold the same field, the first column in sort order keeps it.
    fn canonicalize(&self, mapping: ColumnMapping) -> ColumnMapping {
        let schema_type = mapping.schema_type;
        let mut held = BTreeSet::new();
        let mut column_mappings = BTreeMap::new();

        for (column, field) in mapping.column_mappings {
            let name = std::iter::once(schema_type)
                .chain(SchemaType::ALL)
                .find_map(|t| self.model.field(t, &field))
                .map_or(field, |f| f.name.clone());
            let active = self.model.field(schema_type, &name).is_some();
            if active && !held.insert(name.clone()) {
                debug!(column = %column, field = %name, "dropping duplicate field assignment");
                continue;
            }
            column_mappings.insert(column, name);
        }

        ColumnMapping {
            schema_type,
            column_mappings,
        }
    }

    fn refresh_dirty(&mut self) {
        self.dirty = self.working != self.original;
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.pending_notification = true;
        } else {
            self.revision += 1;
        }
    }
}

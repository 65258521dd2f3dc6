//! One alignment session: mapping state plus its derived warnings.

use std::sync::Arc;

use snac_map::{AlignmentState, MigrationReport, Suggestion, SuggestionEngine};
use snac_model::{ColumnMapping, SchemaModel, SchemaType, Warning};
use snac_validate::{can_save, validate};
use tracing::debug;

use crate::error::Result;

/// Working and saved mapping for one panel, with warnings kept current.
///
/// Warnings are recomputed whenever the underlying state delivers a change
/// notification. Bulk edits made through [`AlignmentSession::batch`] are
/// revalidated once.
#[derive(Debug, Clone)]
pub struct AlignmentSession {
    state: AlignmentState,
    warnings: Vec<Warning>,
    validated_revision: u64,
    /// Whether the host holds a saved schema for the project.
    has_saved_schema: bool,
}

impl AlignmentSession {
    /// Opens a session seeded from the host's saved mapping, if any.
    pub fn new(model: Arc<SchemaModel>, columns: Vec<String>, saved: Option<&ColumnMapping>) -> Self {
        let mut state = AlignmentState::new(model, columns);
        state.reset(saved);
        let mut session = Self {
            state,
            warnings: Vec::new(),
            validated_revision: 0,
            has_saved_schema: saved.is_some(),
        };
        session.revalidate();
        session
    }

    pub fn state(&self) -> &AlignmentState {
        &self.state
    }

    pub fn model(&self) -> &SchemaModel {
        self.state.model()
    }

    pub fn working(&self) -> &ColumnMapping {
        self.state.working()
    }

    pub fn original(&self) -> &ColumnMapping {
        self.state.original()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn is_valid(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Save gate: dirty and free of warnings.
    pub fn can_save(&self) -> bool {
        can_save(&self.warnings, self.state.is_dirty())
    }

    /// The saved mapping, if the host has one.
    pub fn saved_schema(&self) -> Option<&ColumnMapping> {
        self.has_saved_schema.then(|| self.state.original())
    }

    /// Revision of the state the current warnings were computed from.
    pub fn revision(&self) -> u64 {
        self.validated_revision
    }

    /// Returns `Ok(true)` if the mapping changed.
    pub fn set_field_for_column(&mut self, column: &str, field: Option<&str>) -> Result<bool> {
        let changed = self.state.set_field_for_column(column, field)?;
        self.revalidate();
        Ok(changed)
    }

    pub fn set_schema_type(&mut self, schema_type: SchemaType) -> bool {
        let changed = self.state.set_schema_type(schema_type);
        self.revalidate();
        changed
    }

    /// Applies several edits with a single revalidation at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut AlignmentState) -> R) -> R {
        let result = self.state.batch(f);
        self.revalidate();
        result
    }

    /// Fuzzy suggestions for unmapped columns in the active schema type.
    pub fn suggestions(&self, min_confidence: f32) -> Vec<Suggestion> {
        let unmapped: Vec<String> = self
            .state
            .assignments()
            .into_iter()
            .filter(|a| a.field.is_none())
            .map(|a| a.column.to_string())
            .collect();
        SuggestionEngine::new(self.state.model(), self.state.schema_type())
            .suggest_all(&unmapped, min_confidence)
            .into_iter()
            .filter(|s| !self.state.working().is_field_mapped(&s.field))
            .collect()
    }

    /// Assigns suggestions to unmapped columns; returns how many were applied.
    pub fn apply_suggestions(&mut self, suggestions: &[Suggestion]) -> usize {
        let applied = self.state.apply_suggestions(suggestions);
        self.revalidate();
        applied
    }

    pub fn migrate_field_names(&mut self) -> MigrationReport {
        let report = self.state.migrate_field_names();
        self.revalidate();
        report
    }

    /// Replaces the dataset columns after a host-side change.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.state.set_columns(columns);
        self.revalidate();
    }

    /// Reverts the working mapping to the last saved one.
    pub fn discard(&mut self) {
        let original = self.state.original().clone();
        self.state.reset(Some(&original));
        self.revalidate();
    }

    /// Records a confirmed save of `saved`.
    pub fn commit(&mut self, saved: ColumnMapping) {
        self.state.commit(saved);
        self.has_saved_schema = true;
        self.revalidate();
    }

    /// Recomputes warnings if the state changed since the last validation.
    ///
    /// Returns whether the warnings were recomputed.
    fn revalidate(&mut self) -> bool {
        let revision = self.state.revision();
        if revision == self.validated_revision {
            return false;
        }
        self.warnings = validate(self.state.working(), self.state.model());
        self.validated_revision = revision;
        debug!(
            revision,
            warnings = self.warnings.len(),
            dirty = self.state.is_dirty(),
            "revalidated mapping"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use snac_model::SchemaFieldDescriptor;

    use super::*;

    fn session(saved: Option<&ColumnMapping>) -> AlignmentSession {
        let model = SchemaModel::new(
            vec![
                SchemaFieldDescriptor::new("Title", true, ""),
                SchemaFieldDescriptor::new("Resource URL", true, ""),
                SchemaFieldDescriptor::new("Abstract", false, ""),
            ],
            vec![],
            vec![],
        )
        .unwrap();
        AlignmentSession::new(
            Arc::new(model),
            vec!["col1".to_string(), "col2".to_string()],
            saved,
        )
    }

    #[test]
    fn seed_spelled_differently_is_complete() {
        let seed = ColumnMapping::new(SchemaType::Resource)
            .with("col1", "title")
            .with("col2", "resource url");
        let session = session(Some(&seed));
        assert!(session.warnings().is_empty());
        assert!(session.can_save());
        assert!(!session.is_dirty());
        assert_eq!(session.working().column_for("Resource URL"), Some("col2"));
    }

    #[test]
    fn warnings_track_edits() {
        let mut session = session(None);
        assert_eq!(session.warnings().len(), 2);

        session.set_field_for_column("col1", Some("Title")).unwrap();
        assert_eq!(
            session.warnings(),
            &[Warning::missing_required_field("Resource URL")]
        );
        assert!(!session.can_save());

        session.set_field_for_column("col2", Some("Resource URL")).unwrap();
        assert!(session.warnings().is_empty());
        assert!(session.can_save());
    }

    #[test]
    fn batch_revalidates_once_at_the_end() {
        let mut session = session(None);
        let before = session.revision();
        session.batch(|state| {
            state.set_field_for_column("col1", Some("Title")).unwrap();
            state.set_field_for_column("col2", Some("Resource URL")).unwrap();
        });
        assert_eq!(session.revision(), before + 1);
        assert!(session.is_valid());
    }

    #[test]
    fn saved_schema_reflects_host_state() {
        let mut session = session(None);
        assert!(session.saved_schema().is_none());

        session.set_field_for_column("col1", Some("Title")).unwrap();
        let working = session.working().clone();
        session.commit(working.clone());
        assert_eq!(session.saved_schema(), Some(&working));
        assert!(!session.is_dirty());
    }

    #[test]
    fn discard_restores_saved_mapping() {
        let saved = ColumnMapping::new(SchemaType::Resource).with("col1", "Title");
        let mut session = session(Some(&saved));
        session.set_field_for_column("col1", Some("Abstract")).unwrap();
        assert!(session.is_dirty());

        session.discard();
        assert_eq!(session.working(), &saved);
        assert!(!session.is_dirty());
        assert_eq!(session.warnings().len(), 1);
    }
}

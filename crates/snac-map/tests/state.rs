use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use snac_map::{AlignmentState, SuggestionEngine};
use snac_model::{ColumnMapping, SchemaModel, SchemaType};

const COLUMNS: [&str; 4] = ["Name", "Link", "Repo", "Notes"];
const FIELDS: [&str; 5] = ["Title", "Resource URL", "Holding Repository ID", "Abstract", "Extent"];

fn state() -> AlignmentState {
    AlignmentState::new(
        Arc::new(SchemaModel::builtin()),
        COLUMNS.iter().map(|c| c.to_string()).collect(),
    )
}

#[test]
fn discard_restores_saved_mapping() {
    let saved = ColumnMapping::new(SchemaType::Resource)
        .with("Name", "Title")
        .with("Link", "Resource URL");
    let mut state = state();
    state.reset(Some(&saved));

    state.set_field_for_column("Name", None).unwrap();
    state.set_field_for_column("Repo", Some("Holding Repository ID")).unwrap();
    assert!(state.is_dirty());

    let original = state.original().clone();
    state.reset(Some(&original));
    assert_eq!(state.working(), &saved);
    assert!(!state.is_dirty());
}

#[test]
fn undoing_an_edit_clears_dirty() {
    let mut state = state();
    state.set_field_for_column("Name", Some("Title")).unwrap();
    assert!(state.is_dirty());
    state.set_field_for_column("Name", None).unwrap();
    assert!(!state.is_dirty());
}

#[test]
fn suggestions_apply_in_one_batch() {
    let model = SchemaModel::builtin();
    let columns: Vec<String> = ["title", "resource_url", "unrelated"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let suggestions =
        SuggestionEngine::new(&model, SchemaType::Resource).suggest_all(&columns, 0.95);

    let mut state = AlignmentState::new(Arc::new(model), columns);
    let before = state.revision();
    let applied = state.apply_suggestions(&suggestions);

    assert_eq!(applied, 2);
    assert_eq!(state.revision(), before + 1);
    assert_eq!(state.working().field_for("title"), Some("Title"));
    assert_eq!(state.working().field_for("resource_url"), Some("Resource URL"));
    assert_eq!(state.working().field_for("unrelated"), None);
}

#[test]
fn suggestions_skip_columns_already_mapped() {
    let model = SchemaModel::builtin();
    let columns = vec!["title".to_string()];
    let suggestions =
        SuggestionEngine::new(&model, SchemaType::Resource).suggest_all(&columns, 0.95);

    let mut state = AlignmentState::new(Arc::new(model), columns);
    state.set_field_for_column("title", Some("Abstract")).unwrap();
    assert_eq!(state.apply_suggestions(&suggestions), 0);
    assert_eq!(state.working().field_for("title"), Some("Abstract"));
}

#[test]
fn migration_marks_state_dirty() {
    let mut state = state();
    state.reset(Some(
        &ColumnMapping::new(SchemaType::Resource).with("Repo", "Holding Repository SNAC ID"),
    ));
    let report = state.migrate_field_names();
    assert_eq!(report.renamed.len(), 1);
    assert_eq!(state.working().field_for("Repo"), Some("Holding Repository ID"));
    assert!(state.is_dirty());
}

proptest! {
    #[test]
    fn each_field_has_at_most_one_column(
        edits in prop::collection::vec((0..COLUMNS.len(), prop::option::of(0..FIELDS.len())), 0..32)
    ) {
        let mut state = state();
        for (column, field) in edits {
            let field = field.map(|f| FIELDS[f]);
            state.set_field_for_column(COLUMNS[column], field).unwrap();
        }

        let fields: Vec<&str> = state.working().mapped_fields().collect();
        let unique: BTreeSet<&str> = fields.iter().copied().collect();
        prop_assert_eq!(fields.len(), unique.len());
        prop_assert_eq!(state.is_dirty(), state.working() != state.original());
    }

    #[test]
    fn last_assignment_wins(column in 0..COLUMNS.len(), other in 0..COLUMNS.len(), field in 0..FIELDS.len()) {
        let mut state = state();
        state.set_field_for_column(COLUMNS[other], Some(FIELDS[field])).unwrap();
        state.set_field_for_column(COLUMNS[column], Some(FIELDS[field])).unwrap();
        prop_assert_eq!(state.working().column_for(FIELDS[field]), Some(COLUMNS[column]));
    }
}

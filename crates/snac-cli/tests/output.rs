use snac_cli::output::{
    migration_table, model_table, preferences_table, process_summary, suggestions_table,
    warnings_table,
};
use snac_client::{EnvironmentPreferences, Preferences, ProcessCode, ProcessResponse};
use snac_map::{SuggestionEngine, migrate_mapping};
use snac_model::{ColumnMapping, SchemaModel, SchemaType};
use snac_validate::validate;

#[test]
fn model_table_lists_every_field() {
    let model = SchemaModel::builtin();
    let table = model_table(&model, SchemaType::Entity);
    assert_eq!(table.row_iter().count(), model.fields(SchemaType::Entity).len());
    assert!(table.to_string().contains("CPF Type"));
}

#[test]
fn warnings_table_names_missing_fields() {
    let model = SchemaModel::builtin();
    let mapping = ColumnMapping::new(SchemaType::Resource).with("col1", "Title");
    let warnings = validate(&mapping, &model);
    let rendered = warnings_table(&warnings).to_string();
    assert!(rendered.contains("Resource URL"));
    assert!(!rendered.contains("The Title field"));
}

#[test]
fn suggestions_table_keeps_unmatched_columns() {
    let model = SchemaModel::builtin();
    let columns = vec!["title".to_string(), "zzqx".to_string()];
    let suggestions =
        SuggestionEngine::new(&model, SchemaType::Resource).suggest_all(&columns, 0.85);
    let table = suggestions_table(&columns, &suggestions);
    assert_eq!(table.row_iter().count(), 2);
    let rendered = table.to_string();
    assert!(rendered.contains("Title"));
    assert!(rendered.contains("zzqx"));
}

#[test]
fn preferences_table_masks_keys() {
    let mut preferences = Preferences {
        env: "prod".to_string(),
        ..Preferences::default()
    };
    preferences.environments.insert(
        "prod".to_string(),
        EnvironmentPreferences {
            name: "Production".to_string(),
            api_key: "secret-key-9876".to_string(),
            ..EnvironmentPreferences::default()
        },
    );
    preferences
        .environments
        .insert("dev".to_string(), EnvironmentPreferences::default());

    let rendered = preferences_table(&preferences).to_string();
    assert!(rendered.contains("****9876"));
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("not set"));
}

#[test]
fn migration_table_reports_unknown_fields() {
    let model = SchemaModel::builtin();
    let mapping = ColumnMapping::new(SchemaType::Resource).with("col9", "No Such Field");
    let (_, report) = migrate_mapping(&mapping, &model);
    let rendered = migration_table(&report).to_string();
    assert!(rendered.contains("No Such Field"));
    assert!(rendered.contains("unknown field"));
}

#[test]
fn process_summary_prefers_message() {
    let response = ProcessResponse {
        code: ProcessCode::Pending,
        message: Some("queued 12 items".to_string()),
        history_entry: None,
    };
    assert_eq!(
        process_summary("upload", &response),
        "upload started: queued 12 items"
    );
}

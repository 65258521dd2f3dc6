use proptest::prelude::*;
use snac_model::{ColumnMapping, SchemaModel, SchemaType};
use snac_validate::{ValidationReport, can_save, validate};

#[test]
fn empty_resource_mapping_reports_builtin_required_fields() {
    let model = SchemaModel::builtin();
    let warnings = validate(&ColumnMapping::default(), &model);

    insta::assert_json_snapshot!(warnings, @r#"
    [
      {
        "title": "Missing Required Field",
        "field": "Resource Type",
        "body": "The Resource Type field must be assigned to a column."
      },
      {
        "title": "Missing Required Field",
        "field": "Title",
        "body": "The Title field must be assigned to a column."
      },
      {
        "title": "Missing Required Field",
        "field": "Resource URL",
        "body": "The Resource URL field must be assigned to a column."
      },
      {
        "title": "Missing Required Field",
        "field": "Holding Repository ID",
        "body": "The Holding Repository ID field must be assigned to a column."
      }
    ]
    "#);
}

#[test]
fn complete_entity_mapping_can_be_saved() {
    let model = SchemaModel::builtin();
    let mapping = ColumnMapping::new(SchemaType::Entity).with("kind", "CPF Type");
    let report = ValidationReport::new(&mapping, &model);
    assert!(report.is_valid());
    assert!(can_save(&report.warnings, true));
}

fn resource_mapping() -> impl Strategy<Value = ColumnMapping> {
    let names: Vec<String> = SchemaModel::builtin()
        .field_names(SchemaType::Resource)
        .into_iter()
        .map(str::to_string)
        .collect();
    prop::collection::btree_map("[a-z]{1,6}", prop::sample::select(names), 0..8).prop_map(
        |column_mappings| ColumnMapping {
            schema_type: SchemaType::Resource,
            column_mappings,
        },
    )
}

proptest! {
    #[test]
    fn warnings_are_exactly_unmapped_required_fields(mapping in resource_mapping()) {
        let model = SchemaModel::builtin();
        let warned: Vec<String> = validate(&mapping, &model).into_iter().map(|w| w.field).collect();
        let expected: Vec<String> = model
            .required_fields(SchemaType::Resource)
            .into_iter()
            .filter(|f| !mapping.is_field_mapped(f))
            .map(str::to_string)
            .collect();
        prop_assert_eq!(warned, expected);
    }

    #[test]
    fn validation_is_pure(mapping in resource_mapping()) {
        let model = SchemaModel::builtin();
        let before = mapping.clone();
        let first = validate(&mapping, &model);
        let second = validate(&mapping, &model);
        prop_assert_eq!(first, second);
        prop_assert_eq!(mapping, before);
    }
}

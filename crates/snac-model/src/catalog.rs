//! Built-in copy of the field catalog the host serves from `get-model`.
//!
//! Used when working offline and as fixture data in tests. The host remains
//! the source of truth during an alignment session.

use crate::field::FieldVocabulary::{Controlled, FreeText, Identifier};
use crate::field::SchemaFieldDescriptor;
use crate::model::SchemaModel;

fn required(name: &str, tooltip: &str) -> SchemaFieldDescriptor {
    SchemaFieldDescriptor::new(name, true, tooltip)
}

fn optional(name: &str, tooltip: &str) -> SchemaFieldDescriptor {
    SchemaFieldDescriptor::new(name, false, tooltip)
}

fn resource_fields() -> Vec<SchemaFieldDescriptor> {
    vec![
        required(
            "Resource Type",
            "Resource Type may have the following values: ArchivalResource, \
             BibliographicResource, DigitalArchivalResource, OralHistoryResource",
        )
        .with_vocabulary(Controlled),
        optional(
            "Resource ID",
            "SNAC identifier for Resource Description. Leave blank if Resource \
             Description is NOT in SNAC.",
        )
        .with_previous_names(&["SNAC Resource ID"])
        .with_vocabulary(Identifier),
        required(
            "Title",
            "Title of a resource that may or may not include dates \
             (e.g. Jacob Miller Papers, 1809-1882).",
        )
        .with_vocabulary(FreeText),
        required("Resource URL", "URL of the local Resource Description").with_vocabulary(FreeText),
        required(
            "Holding Repository ID",
            "SNAC identifier for the holding repository description. The holding \
             repository must be created in SNAC before adding Resource Descriptions.",
        )
        .with_previous_names(&["Holding Repository SNAC ID"])
        .with_vocabulary(Identifier),
        optional(
            "Abstract",
            "Brief prose abstract of scope and contents of the resource.",
        )
        .with_vocabulary(FreeText),
        optional("Extent", "Extent of the resource.").with_vocabulary(FreeText),
        optional(
            "Date",
            "Date or dates of the resource (YYYY or YYYY-YYYY)",
        )
        .with_vocabulary(FreeText),
        optional(
            "Language Code",
            "ISO 639 Language Code, e.g. 'eng', 'ger', 'jpn'. Combinable with a \
             Script Code in the same row.",
        )
        .with_vocabulary(Controlled)
        .repeatable(),
        optional(
            "Script Code",
            "ISO 15924 Script Code, e.g. 'Latn', 'Cyrl', 'Grek'. Combinable with a \
             Language Code in the same row.",
        )
        .with_vocabulary(Controlled)
        .repeatable(),
    ]
}

fn entity_fields() -> Vec<SchemaFieldDescriptor> {
    let repeatable = |name: &str, tooltip: &str, vocabulary| {
        optional(name, tooltip)
            .with_vocabulary(vocabulary)
            .repeatable()
    };

    vec![
        required(
            "CPF Type",
            "Type of CPF entity. Possible values are: corporateBody, person, family",
        )
        .with_vocabulary(Controlled),
        optional(
            "CPF ID",
            "SNAC identifier for the CPF entity. Leave blank if the CPF is NOT in SNAC.",
        )
        .with_previous_names(&["SNAC CPF ID"])
        .with_vocabulary(Identifier),
        repeatable("Name Entry", "Preferred Name Entry of the CPF entity.", FreeText),
        repeatable("Variant Name Entry", "Variant Name Entry of the CPF entity.", FreeText),
        repeatable("Exist Date", "Exist Date or Dates of the CPF entity.", FreeText),
        repeatable(
            "Exist Date Type",
            "Type of Exist Date. The following values may be used: Active, Birth, \
             Death, Establishment, Disestablishment.",
            Controlled,
        ),
        repeatable(
            "Exist Date Descriptive Note",
            "Descriptive Note of Exist Date.",
            FreeText,
        ),
        repeatable("Subject", "Subject term associated with the CPF entity.", Controlled),
        repeatable("Place", "Place name associated with the CPF entity.", FreeText),
        repeatable(
            "Place Role",
            "Role of the place in relation to the CPF entity. The following values \
             may be used: Birth, Death, Residence, Citizenship, Work.",
            Controlled,
        ),
        repeatable(
            "Place Type",
            "Type of the place in relation to the CPF entity. The following values \
             may be used: AssociatedPlace, Address.",
            Controlled,
        ),
        repeatable(
            "Occupation",
            "Occupation term associated with the CPF entity.",
            Controlled,
        ),
        repeatable("Activity", "Activity term associated with the CPF entity.", Controlled),
        repeatable(
            "Language Code",
            "ISO 639 Language Code, e.g. 'eng', 'ger', 'jpn'.",
            Controlled,
        ),
        repeatable(
            "Script Code",
            "ISO 15924 Script Code, e.g. 'Latn', 'Cyrl', 'Grek'.",
            Controlled,
        ),
        repeatable(
            "BiogHist",
            "Biography or History note associated with the CPF entity.",
            FreeText,
        ),
        repeatable(
            "External Related CPF URL",
            "URL to a description of the CPF entity in an external authority.",
            FreeText,
        ),
        repeatable(
            "Source Citation",
            "Text citation for a source used in describing the CPF entity.",
            FreeText,
        ),
        repeatable(
            "Source Citation URL",
            "URL, if available, for the Source Citation.",
            FreeText,
        ),
        repeatable(
            "Source Citation Found Data",
            "Information found in the Source that is evidence used in the description \
             of the CPF entity.",
            FreeText,
        ),
    ]
}

fn relation_fields() -> Vec<SchemaFieldDescriptor> {
    vec![
        required(
            "CPF Type",
            "Type of CPF entity. Possible values are: corporateBody, person, family",
        )
        .with_vocabulary(Controlled),
        optional(
            "CPF ID",
            "SNAC identifier for the CPF entity. Leave blank if the CPF is NOT in SNAC.",
        )
        .with_previous_names(&["SNAC CPF ID"])
        .with_vocabulary(Identifier),
        optional(
            "CPF to CPF Relation Type",
            "Nature of the relation of the CPF entity with the related CPF entity. \
             The following values may be used: associatedWith, correspondedWith.",
        )
        .with_vocabulary(Controlled)
        .repeatable(),
        optional(
            "Related CPF ID",
            "SNAC ID of a CPF entity in SNAC related to the CPF entity.",
        )
        .with_previous_names(&["Related SNAC CPF ID"])
        .with_vocabulary(Identifier)
        .repeatable(),
        optional(
            "CPF to Resource Relation Type",
            "Role of the CPF entity in relation to the Resource. The following values \
             may be used: contributorOf, creatorOf, editorOf, referencedIn.",
        )
        .with_vocabulary(Controlled)
        .repeatable(),
        optional("Resource ID", "SNAC ID for a related Resource in SNAC.")
            .with_previous_names(&["SNAC Resource ID"])
            .with_vocabulary(Identifier)
            .repeatable(),
    ]
}

impl SchemaModel {
    /// The catalog shipped with the host extension.
    pub fn builtin() -> Self {
        Self::from_parts(resource_fields(), entity_fields(), relation_fields())
    }
}

#[cfg(test)]
mod tests {
    use crate::SchemaType;

    use super::*;

    #[test]
    fn builtin_catalog_has_unique_names() {
        SchemaModel::builtin().check_unique_names().unwrap();
    }

    #[test]
    fn builtin_resource_required_fields_in_order() {
        let model = SchemaModel::builtin();
        assert_eq!(
            model.required_fields(SchemaType::Resource),
            vec!["Resource Type", "Title", "Resource URL", "Holding Repository ID"]
        );
        assert_eq!(model.required_fields(SchemaType::Entity), vec!["CPF Type"]);
    }

    #[test]
    fn builtin_resolves_previous_names() {
        let model = SchemaModel::builtin();
        let field = model
            .resolve_field(SchemaType::Resource, "holding repository snac id")
            .unwrap();
        assert_eq!(field.name, "Holding Repository ID");
        assert!(model.field(SchemaType::Resource, "SNAC Resource ID").is_none());
    }
}

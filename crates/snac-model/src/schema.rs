//! Schema types a project can be aligned to.
//!
//! Each variant carries its own presentation metadata through
//! [`SchemaTypeInfo`], so renderers look up labels, containers and CSS scopes
//! from a table instead of assembling them from strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Target record category of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SchemaType {
    /// Resource description (finding aids, bibliographic records).
    #[default]
    Resource,
    /// Entity record; the host calls these constellations.
    Entity,
    /// Relation/join record between entities and resources.
    Relation,
}

/// Presentation metadata for one schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaTypeInfo {
    pub schema_type: SchemaType,
    /// Human-readable label.
    pub label: &'static str,
    /// Plural used in export file names and preview text.
    pub plural: &'static str,
    /// Id of the container holding the mapping table.
    pub container_id: &'static str,
    /// CSS scope applied to the type's select lists and palette entries.
    pub css_scope: &'static str,
}

const SCHEMA_TYPE_INFO: [SchemaTypeInfo; 3] = [
    SchemaTypeInfo {
        schema_type: SchemaType::Resource,
        label: "Resource",
        plural: "resources",
        container_id: "snac-mapping-table-resource",
        css_scope: "snac-scope-resource",
    },
    SchemaTypeInfo {
        schema_type: SchemaType::Entity,
        label: "Entity",
        plural: "constellations",
        container_id: "snac-mapping-table-entity",
        css_scope: "snac-scope-entity",
    },
    SchemaTypeInfo {
        schema_type: SchemaType::Relation,
        label: "Relation",
        plural: "relations",
        container_id: "snac-mapping-table-relation",
        css_scope: "snac-scope-relation",
    },
];

impl SchemaType {
    /// All schema types in display order.
    pub const ALL: [SchemaType; 3] = [Self::Resource, Self::Entity, Self::Relation];

    /// Name used on the wire by the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Entity => "constellation",
            Self::Relation => "relation",
        }
    }

    /// Presentation metadata for this type.
    #[must_use]
    pub fn info(&self) -> &'static SchemaTypeInfo {
        &SCHEMA_TYPE_INFO[self.index()]
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    const fn index(&self) -> usize {
        match self {
            Self::Resource => 0,
            Self::Entity => 1,
            Self::Relation => 2,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("resource") {
            Ok(Self::Resource)
        } else if trimmed.eq_ignore_ascii_case("constellation")
            || trimmed.eq_ignore_ascii_case("entity")
        {
            Ok(Self::Entity)
        } else if trimmed.eq_ignore_ascii_case("relation") {
            Ok(Self::Relation)
        } else {
            Err(ModelError::UnknownSchemaType(s.to_string()))
        }
    }
}

impl Serialize for SchemaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchemaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Schemas saved before a type was chosen carry an empty string.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}

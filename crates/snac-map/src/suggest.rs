//! Fuzzy column-to-field suggestions.
//!
//! Uses Jaro-Winkler similarity on normalized names. A field is scored by its
//! current name and every previous name; the best of those wins.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};
use snac_model::{SchemaFieldDescriptor, SchemaModel, SchemaType};

/// Default confidence floor for suggestions.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.85;

/// A suggested mapping from column to field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub column: String,
    /// Current field name.
    pub field: String,
    /// 0.0 to 1.0.
    pub confidence: f32,
    /// Name the column matched best: the current name or a previous one.
    pub matched_name: String,
}

/// Scores dataset columns against the fields of one schema type.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'a> {
    model: &'a SchemaModel,
    schema_type: SchemaType,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(model: &'a SchemaModel, schema_type: SchemaType) -> Self {
        Self { model, schema_type }
    }

    /// Score one column against one field.
    ///
    /// Returns `None` if the field is not part of the schema type.
    pub fn score(&self, column: &str, field: &str) -> Option<f32> {
        let descriptor = self.model.resolve_field(self.schema_type, field)?;
        Some(score_field(column, descriptor).0)
    }

    /// Best one-to-one assignments at or above `min_confidence`.
    ///
    /// Greedy by descending score. Each column and field is used at most once.
    pub fn suggest_all(&self, columns: &[String], min_confidence: f32) -> Vec<Suggestion> {
        let mut candidates = Vec::new();
        for descriptor in self.model.fields(self.schema_type) {
            for column in columns {
                let (confidence, matched_name) = score_field(column, descriptor);
                if confidence >= min_confidence {
                    candidates.push(Suggestion {
                        column: column.clone(),
                        field: descriptor.name.clone(),
                        confidence,
                        matched_name: matched_name.to_string(),
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.column.cmp(&b.column))
        });

        let mut assigned_columns = BTreeSet::new();
        let mut assigned_fields = BTreeSet::new();
        let mut suggestions = Vec::new();
        for candidate in candidates {
            if assigned_columns.contains(&candidate.column)
                || assigned_fields.contains(&candidate.field)
            {
                continue;
            }
            assigned_columns.insert(candidate.column.clone());
            assigned_fields.insert(candidate.field.clone());
            suggestions.push(candidate);
        }
        suggestions
    }
}

fn score_field<'d>(column: &str, descriptor: &'d SchemaFieldDescriptor) -> (f32, &'d str) {
    let column = normalize_text(column);
    std::iter::once(descriptor.name.as_str())
        .chain(descriptor.previous_names.iter().map(String::as_str))
        .map(|name| {
            let candidate = normalize_text(name);
            let score = jaro_winkler::similarity(column.chars(), candidate.chars()) as f32;
            (score, name)
        })
        .fold((0.0, descriptor.name.as_str()), |best, next| {
            if next.0 > best.0 { next } else { best }
        })
}

/// Normalizes a name for comparison.
///
/// Non-alphanumeric characters become spaces, runs of whitespace collapse,
/// and the result is lowercased.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

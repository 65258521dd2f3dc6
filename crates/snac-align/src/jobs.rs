//! Host-side jobs started from a saved schema: upload, validation, export.

use chrono::NaiveDate;
use serde_json::Value;
use snac_client::{EngineConfig, Preferences, ProcessResponse, export_file_name};
use snac_model::ColumnMapping;
use tracing::info;

use crate::backend::HostBackend;
use crate::error::{AlignError, Result};

/// Long-running host job that needs a saved schema and an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Upload,
    Validation,
}

impl JobKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Validation => "validation",
        }
    }
}

/// Refuses to start when no schema is saved or the active environment has no key.
pub fn check_job_preconditions(
    saved: Option<&ColumnMapping>,
    preferences: &Preferences,
) -> Result<()> {
    if saved.is_none() {
        return Err(AlignError::NoSavedSchema);
    }
    if !preferences.has_active_api_key() {
        return Err(AlignError::MissingApiKey(preferences.env.clone()));
    }
    Ok(())
}

/// Checks preconditions against the host's preferences, then starts the job.
pub async fn start_job<B: HostBackend>(
    backend: &B,
    kind: JobKind,
    saved: Option<&ColumnMapping>,
    engine: &EngineConfig,
) -> Result<ProcessResponse> {
    let preferences = backend.preferences().await?;
    check_job_preconditions(saved, &preferences)?;

    info!(job = kind.label(), env = %preferences.env, "starting host job");
    let response = match kind {
        JobKind::Upload => backend.perform_uploads(engine).await?,
        JobKind::Validation => backend.perform_validation(engine).await?,
    };
    Ok(response)
}

/// A JSON export ready to be written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub file_name: String,
    pub document: Value,
}

/// Exports the items `mapping` produces, named for `date`.
pub async fn export<B: HostBackend>(
    backend: &B,
    mapping: &ColumnMapping,
    engine: &EngineConfig,
    date: NaiveDate,
) -> Result<ExportDocument> {
    let document = backend.export_json(mapping, engine).await?;
    Ok(ExportDocument {
        file_name: export_file_name(mapping.schema_type, date),
        document,
    })
}

#[cfg(test)]
mod tests {
    use snac_client::EnvironmentPreferences;
    use snac_model::SchemaType;

    use super::*;

    fn prefs(key: &str) -> Preferences {
        let mut prefs = Preferences {
            env: "dev".to_string(),
            ..Preferences::default()
        };
        prefs.environments.insert(
            "dev".to_string(),
            EnvironmentPreferences {
                api_key: key.to_string(),
                ..EnvironmentPreferences::default()
            },
        );
        prefs
    }

    #[test]
    fn requires_saved_schema() {
        assert_eq!(
            check_job_preconditions(None, &prefs("key")),
            Err(AlignError::NoSavedSchema)
        );
    }

    #[test]
    fn requires_api_key() {
        let saved = ColumnMapping::new(SchemaType::Resource);
        assert_eq!(
            check_job_preconditions(Some(&saved), &prefs("  ")),
            Err(AlignError::MissingApiKey("dev".to_string()))
        );
        assert_eq!(check_job_preconditions(Some(&saved), &prefs("key")), Ok(()));
    }
}

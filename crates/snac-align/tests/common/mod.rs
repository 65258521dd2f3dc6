//! In-memory host used by the workflow tests.

#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::{Value, json};
use snac_align::HostBackend;
use snac_client::{
    ClientError, EngineConfig, EnvironmentPreferences, Preferences, PreviewResult, ProcessCode,
    ProcessResponse, Result,
};
use snac_model::{ColumnMapping, SchemaFieldDescriptor, SchemaModel};

pub fn model() -> SchemaModel {
    SchemaModel::new(
        vec![
            SchemaFieldDescriptor::new("Title", true, "Title of a resource"),
            SchemaFieldDescriptor::new("Resource URL", true, "URL of the local description"),
            SchemaFieldDescriptor::new("Abstract", false, "Brief prose abstract"),
        ],
        vec![SchemaFieldDescriptor::new("CPF Type", true, "Type of CPF entity")],
        vec![],
    )
    .unwrap()
}

pub fn columns() -> Vec<String> {
    vec!["col1".to_string(), "col2".to_string(), "col3".to_string()]
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub model_loads: Mutex<u32>,
    pub fail_model: Mutex<bool>,
    pub fail_save: Mutex<Option<ClientError>>,
    pub saved: Mutex<Vec<ColumnMapping>>,
    pub previews: Mutex<Vec<ColumnMapping>>,
    pub jobs: Mutex<Vec<&'static str>>,
    pub api_key: Mutex<String>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preview text the fake renders for a mapping.
    pub fn render(mapping: &ColumnMapping) -> PreviewResult {
        PreviewResult {
            sample_items: mapping
                .column_mappings
                .iter()
                .map(|(column, field)| format!("{field} <- {column}"))
                .collect(),
            total_item_count: 3,
        }
    }

    fn ok() -> ProcessResponse {
        ProcessResponse {
            code: ProcessCode::Ok,
            message: None,
            history_entry: None,
        }
    }
}

impl HostBackend for FakeHost {
    async fn get_model(&self) -> Result<SchemaModel> {
        *self.model_loads.lock().unwrap() += 1;
        if *self.fail_model.lock().unwrap() {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(model())
    }

    async fn preferences(&self) -> Result<Preferences> {
        let mut prefs = Preferences {
            env: "dev".to_string(),
            ..Preferences::default()
        };
        prefs.environments.insert(
            "dev".to_string(),
            EnvironmentPreferences {
                name: "Development".to_string(),
                api_key: self.api_key.lock().unwrap().clone(),
                ..EnvironmentPreferences::default()
            },
        );
        Ok(prefs)
    }

    async fn save_schema(&self, mapping: &ColumnMapping) -> Result<ProcessResponse> {
        if let Some(err) = self.fail_save.lock().unwrap().clone() {
            return Err(err);
        }
        self.saved.lock().unwrap().push(mapping.clone());
        Ok(Self::ok())
    }

    async fn preview_schema(
        &self,
        mapping: &ColumnMapping,
        _engine: &EngineConfig,
    ) -> Result<PreviewResult> {
        self.previews.lock().unwrap().push(mapping.clone());
        Ok(Self::render(mapping))
    }

    async fn perform_uploads(&self, _engine: &EngineConfig) -> Result<ProcessResponse> {
        self.jobs.lock().unwrap().push("upload");
        Ok(Self::ok())
    }

    async fn perform_validation(&self, _engine: &EngineConfig) -> Result<ProcessResponse> {
        self.jobs.lock().unwrap().push("validation");
        Ok(Self::ok())
    }

    async fn export_json(&self, mapping: &ColumnMapping, _engine: &EngineConfig) -> Result<Value> {
        Ok(json!({ "schemaType": mapping.schema_type.as_str(), "items": [] }))
    }
}

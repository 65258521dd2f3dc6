//! Wire types exchanged with the host.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snac_model::SchemaType;

/// Row filter forwarded to the host as its `engine` parameter.
///
/// Carries the host's facet selection verbatim; the client never interprets
/// individual facets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub facets: Vec<Value>,
    #[serde(default = "EngineConfig::default_mode")]
    pub mode: String,
}

impl EngineConfig {
    fn default_mode() -> String {
        "row-based".to_string()
    }

    /// Record-based filtering (one item per record rather than per row).
    pub fn record_based() -> Self {
        Self {
            facets: Vec::new(),
            mode: "record-based".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            facets: Vec::new(),
            mode: Self::default_mode(),
        }
    }
}

/// Server-rendered preview of the items a mapping would produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    #[serde(rename = "preview", alias = "items_preview", default)]
    pub sample_items: Vec<String>,
    #[serde(rename = "total", alias = "item_count", default)]
    pub total_item_count: u64,
}

/// Outcome code of a long-running host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessCode {
    Ok,
    Pending,
    Error,
}

/// History entry the host records for a completed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// Response of commands that start or record a host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub code: ProcessCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_entry: Option<HistoryEntry>,
}

/// Plain `{status, message}` response of status-only commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Settings for one SNAC environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentPreferences {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
}

impl EnvironmentPreferences {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPreferences {
    #[serde(default)]
    pub max_items: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPreferences {
    #[serde(default)]
    pub api_response: bool,
}

/// Extension preferences as returned by the `preferences` command.
///
/// Environments are keyed by id (`dev`, `prod`) at the top level of the
/// host's JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Id of the active environment.
    pub env: String,
    #[serde(default)]
    pub preview: PreviewPreferences,
    #[serde(default)]
    pub upload: UploadPreferences,
    #[serde(flatten)]
    pub environments: BTreeMap<String, EnvironmentPreferences>,
}

impl Preferences {
    /// Settings of the active environment.
    pub fn active(&self) -> Option<&EnvironmentPreferences> {
        self.environments.get(&self.env)
    }

    /// True if the active environment carries an API key.
    pub fn has_active_api_key(&self) -> bool {
        self.active().is_some_and(EnvironmentPreferences::has_api_key)
    }
}

/// Changes posted to the `preferences` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub env: String,
    pub key_dev: String,
    pub key_prod: String,
    pub max_preview_items: u32,
    pub include_api_response: bool,
}

impl PreferencesUpdate {
    /// Starts from the current preferences so unchanged values round-trip.
    pub fn from_current(current: &Preferences) -> Self {
        let key = |id: &str| {
            current
                .environments
                .get(id)
                .map(|e| e.api_key.clone())
                .unwrap_or_default()
        };
        Self {
            env: current.env.clone(),
            key_dev: key("dev"),
            key_prod: key("prod"),
            max_preview_items: current.preview.max_items,
            include_api_response: current.upload.api_response,
        }
    }

    /// Form fields in the order the host reads them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("snacenv", self.env.clone()),
            ("snackeydev", self.key_dev.clone()),
            ("snackeyprod", self.key_prod.clone()),
            ("snacmaxpreviewitems", self.max_preview_items.to_string()),
            ("snacincludeapiresponse", self.include_api_response.to_string()),
        ]
    }
}

/// Response of the legacy `apikey` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    #[serde(default)]
    pub apikey: Option<String>,
}

/// File name the host's export dialog suggests for a JSON export.
pub fn export_file_name(schema_type: SchemaType, date: NaiveDate) -> String {
    format!(
        "{}-SNAC-export-{}s.json",
        date.format("%Y-%m-%d"),
        schema_type.as_str()
    )
}

/// Error message carried by a host error body, if `value` is one.
///
/// The host reports failures as `{"code": "error", ...}` or
/// `{"status": "error", ...}`.
pub fn error_message(value: &Value) -> Option<String> {
    let is_error = ["code", "status"]
        .iter()
        .any(|key| value.get(key).and_then(Value::as_str) == Some("error"));
    if !is_error {
        return None;
    }
    Some(
        value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("The host reported an error.")
            .to_string(),
    )
}

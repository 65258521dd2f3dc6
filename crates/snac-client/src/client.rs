//! Async client for the host's SNAC commands.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snac_model::{ColumnMapping, SchemaModel};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{
    ApiKeyResponse, EngineConfig, Preferences, PreferencesUpdate, PreviewResult, ProcessCode,
    ProcessResponse, StatusResponse, error_message,
};

/// User agent string for host requests.
const USER_AGENT_VALUE: &str = concat!("snac-align/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CsrfToken {
    token: String,
}

/// Client for the host's `command/snac/*` endpoints.
#[derive(Debug, Clone)]
pub struct HostClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HostClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the field catalog for every schema type.
    pub async fn get_model(&self) -> Result<SchemaModel> {
        let url = self.config.command_url("snac", "get-model")?;
        debug!(%url, "fetching schema model");
        let model: SchemaModel = self.get_json(url).await?;
        // Field names must be unique per schema type.
        model
            .check_unique_names()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(model)
    }

    /// Reads the extension preferences.
    pub async fn preferences(&self) -> Result<Preferences> {
        let url = self.config.command_url("snac", "preferences")?;
        self.get_json(url).await
    }

    /// Saves preferences; the host answers with the resulting preferences.
    pub async fn save_preferences(&self, update: &PreferencesUpdate) -> Result<Preferences> {
        info!(env = %update.env, "saving preferences");
        let url = self.config.command_url("snac", "preferences")?;
        self.post_form(url, update.form_fields()).await
    }

    /// Persists `mapping` on the host project.
    pub async fn save_schema(&self, mapping: &ColumnMapping) -> Result<ProcessResponse> {
        info!(schema_type = %mapping.schema_type, "saving schema");
        let url = self.project_url("save-schema")?;
        let fields = vec![("schema", serde_json::to_string(mapping)?)];
        let response: ProcessResponse = self.post_form(url, fields).await?;
        Self::check_process(response)
    }

    /// Renders sample items for `mapping` over the rows selected by `engine`.
    pub async fn preview_schema(
        &self,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> Result<PreviewResult> {
        debug!(schema_type = %mapping.schema_type, "requesting preview");
        let url = self.project_url("preview-schema")?;
        let fields = vec![
            ("schema", serde_json::to_string(mapping)?),
            ("engine", serde_json::to_string(engine)?),
        ];
        self.post_form(url, fields).await
    }

    /// Starts the upload process for the saved schema.
    pub async fn perform_uploads(&self, engine: &EngineConfig) -> Result<ProcessResponse> {
        info!("starting uploads");
        self.engine_process("perform-uploads", engine).await
    }

    /// Starts the validation process for the saved schema.
    pub async fn perform_validation(&self, engine: &EngineConfig) -> Result<ProcessResponse> {
        info!("starting validation");
        self.engine_process("perform-validation", engine).await
    }

    /// Exports the items `mapping` produces as one JSON document.
    pub async fn export_json(
        &self,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> Result<Value> {
        info!(schema_type = %mapping.schema_type, "exporting JSON");
        let url = self.project_url("export-json")?;
        let fields = vec![
            ("schema", serde_json::to_string(mapping)?),
            ("engine", serde_json::to_string(engine)?),
        ];
        self.post_form(url, fields).await
    }

    /// Rewrites previous field names in the project's saved schema.
    pub async fn migrate_schema(&self) -> Result<StatusResponse> {
        info!("migrating saved schema");
        let url = self.project_url("migrate-schema")?;
        self.post_form(url, Vec::new()).await
    }

    /// Legacy single-key command: stores `key`, or logs out when `None`.
    pub async fn api_key(&self, key: Option<&str>) -> Result<ApiKeyResponse> {
        let url = self.config.command_url("snac", "apikey")?;
        let fields = match key {
            Some(key) => vec![("snackey", key.to_string())],
            None => vec![("logout", "true".to_string())],
        };
        self.post_form(url, fields).await
    }

    fn project_url(&self, command: &str) -> Result<Url> {
        let project = self.config.require_project()?;
        let mut url = self.config.command_url("snac", command)?;
        url.query_pairs_mut().append_pair("project", project);
        Ok(url)
    }

    async fn engine_process(&self, command: &str, engine: &EngineConfig) -> Result<ProcessResponse> {
        let url = self.project_url(command)?;
        let fields = vec![("engine", serde_json::to_string(engine)?)];
        let response: ProcessResponse = self.post_form(url, fields).await?;
        Self::check_process(response)
    }

    fn check_process(response: ProcessResponse) -> Result<ProcessResponse> {
        match response.code {
            ProcessCode::Error => Err(ClientError::server(
                response
                    .message
                    .unwrap_or_else(|| "The host reported an error.".to_string()),
            )),
            _ => Ok(response),
        }
    }

    async fn csrf_token(&self) -> Result<String> {
        let url = self.config.command_url("core", "get-csrf-token")?;
        let token: CsrfToken = self.get_json(url).await?;
        Ok(token.token)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        mut fields: Vec<(&'static str, String)>,
    ) -> Result<T> {
        fields.push(("csrf_token", self.csrf_token().await?));
        debug!(%url, "posting form");
        let response = self.client.post(url).form(&fields).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

/// Decodes a host response body, mapping error bodies to [`ClientError::Server`].
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if status.is_success() => return Err(e.into()),
        Err(_) => {
            warn!(%status, "host returned a non-JSON error");
            return Err(ClientError::server(format!("host returned HTTP {status}")));
        }
    };

    if let Some(message) = error_message(&value) {
        warn!(%status, error = %message, "host reported an error");
        return Err(ClientError::server(message));
    }
    if !status.is_success() {
        return Err(ClientError::server(format!("host returned HTTP {status}")));
    }
    serde_json::from_value(value).map_err(ClientError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn test_client_creation() {
        let client = HostClient::new(ClientConfig::new(DEFAULT_BASE_URL).unwrap());
        assert!(client.is_ok());
    }

    #[test]
    fn project_commands_carry_project_parameter() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_project("42");
        let client = HostClient::new(config).unwrap();
        assert_eq!(
            client.project_url("save-schema").unwrap().as_str(),
            "http://127.0.0.1:3333/command/snac/save-schema?project=42"
        );
    }

    #[test]
    fn process_errors_become_server_errors() {
        let response = ProcessResponse {
            code: ProcessCode::Error,
            message: Some("Invalid schema".to_string()),
            history_entry: None,
        };
        assert_eq!(
            HostClient::check_process(response),
            Err(ClientError::server("Invalid schema"))
        );
    }
}

//! Host operations the alignment workflow depends on.

use std::future::Future;

use serde_json::Value;
use snac_client::{
    EngineConfig, HostClient, Preferences, PreviewResult, ProcessResponse, Result,
};
use snac_model::{ColumnMapping, SchemaModel};

/// The host commands used by the alignment workflow.
///
/// [`HostClient`] talks to a live host; tests substitute an in-memory fake.
pub trait HostBackend: Sync {
    fn get_model(&self) -> impl Future<Output = Result<SchemaModel>> + Send;

    fn preferences(&self) -> impl Future<Output = Result<Preferences>> + Send;

    fn save_schema(
        &self,
        mapping: &ColumnMapping,
    ) -> impl Future<Output = Result<ProcessResponse>> + Send;

    fn preview_schema(
        &self,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> impl Future<Output = Result<PreviewResult>> + Send;

    fn perform_uploads(
        &self,
        engine: &EngineConfig,
    ) -> impl Future<Output = Result<ProcessResponse>> + Send;

    fn perform_validation(
        &self,
        engine: &EngineConfig,
    ) -> impl Future<Output = Result<ProcessResponse>> + Send;

    fn export_json(
        &self,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> impl Future<Output = Result<Value>> + Send;
}

impl HostBackend for HostClient {
    async fn get_model(&self) -> Result<SchemaModel> {
        HostClient::get_model(self).await
    }

    async fn preferences(&self) -> Result<Preferences> {
        HostClient::preferences(self).await
    }

    async fn save_schema(&self, mapping: &ColumnMapping) -> Result<ProcessResponse> {
        HostClient::save_schema(self, mapping).await
    }

    async fn preview_schema(
        &self,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> Result<PreviewResult> {
        HostClient::preview_schema(self, mapping, engine).await
    }

    async fn perform_uploads(&self, engine: &EngineConfig) -> Result<ProcessResponse> {
        HostClient::perform_uploads(self, engine).await
    }

    async fn perform_validation(&self, engine: &EngineConfig) -> Result<ProcessResponse> {
        HostClient::perform_validation(self, engine).await
    }

    async fn export_json(&self, mapping: &ColumnMapping, engine: &EngineConfig) -> Result<Value> {
        HostClient::export_json(self, mapping, engine).await
    }
}

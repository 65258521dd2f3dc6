//! Memoized access to the host's schema model.

use std::sync::Arc;

use snac_model::SchemaModel;
use tracing::{debug, info, warn};

use crate::backend::HostBackend;
use crate::error::Result;

/// Loads the schema model once per session and hands out shared copies.
///
/// There is no automatic refresh; a failed load leaves the cache empty so the
/// next call retries.
#[derive(Debug, Clone, Default)]
pub struct SchemaModelProvider {
    cached: Option<Arc<SchemaModel>>,
}

impl SchemaModelProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-seeded with a model, e.g. the built-in catalog.
    pub fn with_model(model: SchemaModel) -> Self {
        Self {
            cached: Some(Arc::new(model)),
        }
    }

    pub fn cached(&self) -> Option<Arc<SchemaModel>> {
        self.cached.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// Stores a model fetched elsewhere and returns the shared handle.
    pub fn store(&mut self, model: Arc<SchemaModel>) -> Arc<SchemaModel> {
        self.cached = Some(Arc::clone(&model));
        model
    }

    /// Returns the cached model or fetches it from the host.
    pub async fn load<B: HostBackend>(&mut self, backend: &B) -> Result<Arc<SchemaModel>> {
        if let Some(model) = &self.cached {
            debug!("using cached schema model");
            return Ok(Arc::clone(model));
        }

        info!("loading schema model from host");
        match backend.get_model().await {
            Ok(model) => Ok(self.store(Arc::new(model))),
            Err(e) => {
                warn!(error = %e, "schema model load failed");
                Err(e.into())
            }
        }
    }
}

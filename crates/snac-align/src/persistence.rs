//! Saving and discarding the working mapping.

use snac_client::{ClientError, ProcessResponse};
use snac_model::ColumnMapping;
use tracing::{info, warn};

use crate::backend::HostBackend;
use crate::error::{AlignError, Result};
use crate::session::AlignmentSession;

/// Tracks the save in flight for one session.
///
/// A save snapshots the working mapping; on success that snapshot becomes the
/// saved baseline. Edits made while the save is outstanding stay in the
/// working copy and keep the session dirty.
#[derive(Debug, Clone, Default)]
pub struct PersistenceGateway {
    in_flight: Option<ColumnMapping>,
}

impl PersistenceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Snapshots the working mapping for saving.
    pub fn begin_save(&mut self, session: &AlignmentSession) -> Result<ColumnMapping> {
        if self.in_flight.is_some() {
            return Err(AlignError::CannotSave("A save is already in progress."));
        }
        if !session.is_dirty() {
            return Err(AlignError::CannotSave("There are no unsaved changes."));
        }
        if !session.is_valid() {
            return Err(AlignError::CannotSave(
                "Assign every required field before saving.",
            ));
        }
        let snapshot = session.working().clone();
        info!(
            schema_type = %snapshot.schema_type,
            mappings = snapshot.len(),
            "saving mapping"
        );
        self.in_flight = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Applies the host's answer to the save started by [`Self::begin_save`].
    ///
    /// Failures leave the session untouched; no retry is attempted.
    pub fn finish_save(
        &mut self,
        session: &mut AlignmentSession,
        result: std::result::Result<ProcessResponse, ClientError>,
    ) -> Result<()> {
        let Some(saved) = self.in_flight.take() else {
            warn!("save response without a save in flight");
            return Ok(());
        };
        match result {
            Ok(_) => {
                info!("mapping saved");
                session.commit(saved);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                Err(e.into())
            }
        }
    }

    /// Saves the working mapping and waits for the host.
    pub async fn save<B: HostBackend>(
        &mut self,
        backend: &B,
        session: &mut AlignmentSession,
    ) -> Result<()> {
        let mapping = self.begin_save(session)?;
        let result = backend.save_schema(&mapping).await;
        self.finish_save(session, result)
    }

    /// Reverts to the saved mapping. Local only; always succeeds.
    pub fn discard(&self, session: &mut AlignmentSession) {
        info!("discarding unsaved changes");
        session.discard();
    }
}

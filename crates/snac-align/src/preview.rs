//! Server-rendered previews with stale-response protection.
//!
//! Every request is issued under a new [`PreviewTicket`]. Only a response
//! carrying the latest ticket is rendered; anything older is dropped, so a
//! slow response for an earlier mapping can never overwrite a newer preview.

use snac_client::{ClientError, EngineConfig, PreviewResult};
use snac_model::ColumnMapping;
use tracing::{debug, warn};

use crate::backend::HostBackend;

/// Generation tag of one preview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreviewTicket(u64);

impl PreviewTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What the preview panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewPanel {
    /// Nothing requested yet, or the mapping has warnings.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    Ready(PreviewResult),
    /// The host rejected the mapping.
    InvalidSchema(String),
    /// The host could not be reached.
    Unavailable(String),
}

/// Issues preview requests and decides which responses to render.
#[derive(Debug, Clone, Default)]
pub struct PreviewRequester {
    generation: u64,
    panel: PreviewPanel,
    dropped: u64,
}

impl PreviewRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> &PreviewPanel {
        &self.panel
    }

    /// Ticket of the most recent request.
    pub fn latest(&self) -> PreviewTicket {
        PreviewTicket(self.generation)
    }

    /// Number of stale responses discarded so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Starts a new request; earlier tickets become stale.
    pub fn begin(&mut self) -> PreviewTicket {
        self.generation += 1;
        self.panel = PreviewPanel::Loading;
        debug!(generation = self.generation, "preview requested");
        PreviewTicket(self.generation)
    }

    /// Clears the panel and invalidates any request in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.panel = PreviewPanel::Idle;
    }

    /// Applies a response if `ticket` is still the latest.
    ///
    /// Host errors become a banner in the panel rather than an error for the
    /// caller. Returns whether the response was rendered.
    pub fn accept(
        &mut self,
        ticket: PreviewTicket,
        result: Result<PreviewResult, ClientError>,
    ) -> bool {
        if ticket.0 != self.generation {
            self.dropped += 1;
            debug!(
                ticket = ticket.0,
                latest = self.generation,
                "dropping stale preview response"
            );
            return false;
        }

        self.panel = match result {
            Ok(preview) => {
                debug!(
                    items = preview.sample_items.len(),
                    total = preview.total_item_count,
                    "preview ready"
                );
                PreviewPanel::Ready(preview)
            }
            Err(ClientError::Server { message }) => {
                warn!(error = %message, "host rejected the schema");
                PreviewPanel::InvalidSchema(message)
            }
            Err(e) => {
                warn!(error = %e, "preview request failed");
                PreviewPanel::Unavailable(e.user_message().to_string())
            }
        };
        true
    }

    /// Requests and applies a preview in one step.
    pub async fn request_preview<B: HostBackend>(
        &mut self,
        backend: &B,
        mapping: &ColumnMapping,
        engine: &EngineConfig,
    ) -> &PreviewPanel {
        let ticket = self.begin();
        let result = backend.preview_schema(mapping, engine).await;
        self.accept(ticket, result);
        &self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(items: &[&str], total: u64) -> PreviewResult {
        PreviewResult {
            sample_items: items.iter().map(|s| s.to_string()).collect(),
            total_item_count: total,
        }
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut requester = PreviewRequester::new();
        let first = requester.begin();
        let second = requester.begin();

        assert!(requester.accept(second, Ok(preview(&["M2"], 1))));
        assert!(!requester.accept(first, Ok(preview(&["M1"], 1))));
        assert_eq!(requester.panel(), &PreviewPanel::Ready(preview(&["M2"], 1)));
        assert_eq!(requester.dropped(), 1);
    }

    #[test]
    fn stale_response_arriving_first_is_dropped_too() {
        let mut requester = PreviewRequester::new();
        let first = requester.begin();
        let second = requester.begin();

        assert!(!requester.accept(first, Ok(preview(&["M1"], 1))));
        assert_eq!(requester.panel(), &PreviewPanel::Loading);
        assert!(requester.accept(second, Ok(preview(&["M2"], 1))));
    }

    #[test]
    fn server_error_renders_invalid_schema_banner() {
        let mut requester = PreviewRequester::new();
        let ticket = requester.begin();
        requester.accept(
            ticket,
            Err(ClientError::Server {
                message: "SNAC schema could not be parsed.".to_string(),
            }),
        );
        assert_eq!(
            requester.panel(),
            &PreviewPanel::InvalidSchema("SNAC schema could not be parsed.".to_string())
        );
    }

    #[test]
    fn clear_invalidates_in_flight_request() {
        let mut requester = PreviewRequester::new();
        let ticket = requester.begin();
        requester.clear();
        assert!(!requester.accept(ticket, Ok(preview(&["x"], 1))));
        assert_eq!(requester.panel(), &PreviewPanel::Idle);
    }
}

//! The alignment panel as an Elm-style state machine.
//!
//! [`AlignmentView::update`] consumes a [`Message`] and returns the
//! [`Effect`]s it needs executed. [`AlignmentView::view_model`] renders the
//! current state into plain data; nothing is ever read back from a rendering.

mod driver;
mod message;
mod render;

use std::sync::Arc;

use snac_client::{ClientError, EngineConfig, ProcessResponse};
use snac_model::{ColumnMapping, SchemaModel};
use tracing::{debug, info, warn};

use crate::error::{AlignError, Result as AlignResult};
use crate::persistence::PersistenceGateway;
use crate::preview::PreviewRequester;
use crate::provider::SchemaModelProvider;
use crate::session::AlignmentSession;

pub use driver::{dispatch, run_effect};
pub use message::{Effect, Message, Tab};
pub use render::{
    AlignmentViewModel, ColumnRow, FieldOption, PaletteItem, PreviewPanelModel, SchemaTypeTab,
    WarningsPanel,
};

/// Lifecycle phase of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Saving,
}

/// One alignment panel.
#[derive(Debug, Clone)]
pub struct AlignmentView {
    phase: ViewPhase,
    provider: SchemaModelProvider,
    session: Option<AlignmentSession>,
    preview: PreviewRequester,
    gateway: PersistenceGateway,
    /// Dataset columns, kept here until a session exists.
    columns: Vec<String>,
    /// Host-saved mapping used to seed the session.
    saved: Option<ColumnMapping>,
    engine: EngineConfig,
    tab: Tab,
    error: Option<String>,
    /// Host data changed while a save was in flight.
    discard_after_save: bool,
}

impl AlignmentView {
    pub fn new(columns: Vec<String>, saved: Option<ColumnMapping>, engine: EngineConfig) -> Self {
        Self {
            phase: ViewPhase::Uninitialized,
            provider: SchemaModelProvider::new(),
            session: None,
            preview: PreviewRequester::new(),
            gateway: PersistenceGateway::new(),
            columns,
            saved,
            engine,
            tab: Tab::Schema,
            error: None,
            discard_after_save: false,
        }
    }

    /// View whose model is already known, e.g. the built-in catalog.
    #[must_use]
    pub fn with_model(mut self, model: SchemaModel) -> Self {
        self.provider = SchemaModelProvider::with_model(model);
        self
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&AlignmentSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> &PreviewRequester {
        &self.preview
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Processes one message.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Launch => self.handle_launch(),
            Message::ModelLoaded(result) => self.handle_model_loaded(result),
            Message::HostChanged { columns, engine } => self.handle_host_changed(columns, engine),

            Message::SetField { column, field } => {
                self.edit(|session| session.set_field_for_column(&column, field.as_deref()))
            }
            Message::SetSchemaType(schema_type) => {
                self.edit(|session| Ok(session.set_schema_type(schema_type)))
            }
            Message::ApplySuggestions(min_confidence) => self.edit(|session| {
                let suggestions = session.suggestions(min_confidence);
                Ok(session.apply_suggestions(&suggestions) > 0)
            }),

            Message::SwitchTab(tab) => {
                self.tab = tab;
                Vec::new()
            }
            Message::RefreshPreview => match self.phase {
                ViewPhase::Ready | ViewPhase::Saving => self.refresh_preview(),
                _ => Vec::new(),
            },
            Message::PreviewReady { ticket, result } => {
                self.preview.accept(ticket, result);
                Vec::new()
            }

            Message::Save => self.handle_save(),
            Message::Saved(result) => self.handle_saved(result),
            Message::Discard => self.handle_discard(),
            Message::DismissError => {
                self.error = None;
                Vec::new()
            }
        }
    }

    fn handle_launch(&mut self) -> Vec<Effect> {
        match self.phase {
            ViewPhase::Uninitialized => {
                self.error = None;
                if let Some(model) = self.provider.cached() {
                    return self.open_session(model);
                }
                info!("launching alignment view");
                self.phase = ViewPhase::Loading;
                vec![Effect::LoadModel]
            }
            ViewPhase::Loading => Vec::new(),
            ViewPhase::Ready | ViewPhase::Saving => {
                debug!("alignment view already open; re-focusing");
                self.tab = Tab::Schema;
                vec![Effect::Focus]
            }
        }
    }

    fn handle_model_loaded(
        &mut self,
        result: Result<Arc<SchemaModel>, ClientError>,
    ) -> Vec<Effect> {
        if self.phase != ViewPhase::Loading {
            warn!(phase = ?self.phase, "ignoring model load outside of loading");
            return Vec::new();
        }
        match result {
            Ok(model) => {
                let model = self.provider.store(model);
                self.open_session(model)
            }
            Err(e) => {
                warn!(error = %e, "could not load schema model");
                self.phase = ViewPhase::Uninitialized;
                self.error = Some(e.user_message().to_string());
                Vec::new()
            }
        }
    }

    fn open_session(&mut self, model: Arc<SchemaModel>) -> Vec<Effect> {
        let session = AlignmentSession::new(model, self.columns.clone(), self.saved.as_ref());
        self.session = Some(session);
        self.phase = ViewPhase::Ready;
        info!("alignment view ready");
        self.refresh_preview()
    }

    fn handle_host_changed(&mut self, columns: Vec<String>, engine: EngineConfig) -> Vec<Effect> {
        self.columns.clone_from(&columns);
        self.engine = engine;
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.set_columns(columns);
        if self.phase == ViewPhase::Saving {
            debug!("host data changed during save; discarding once the save settles");
            self.discard_after_save = true;
            return Vec::new();
        }
        debug!("host data changed; discarding unsaved changes");
        self.gateway.discard(session);
        self.refresh_preview()
    }

    /// Runs a mapping edit and refreshes the preview if anything changed.
    fn edit(
        &mut self,
        f: impl FnOnce(&mut AlignmentSession) -> AlignResult<bool>,
    ) -> Vec<Effect> {
        if !matches!(self.phase, ViewPhase::Ready | ViewPhase::Saving) {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match f(session) {
            Ok(true) => self.refresh_preview(),
            Ok(false) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "edit rejected");
                self.error = Some(e.user_message().to_string());
                Vec::new()
            }
        }
    }

    /// Requests a preview for a valid mapping, or clears the panel.
    fn refresh_preview(&mut self) -> Vec<Effect> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        if !session.is_valid() {
            self.preview.clear();
            return Vec::new();
        }
        let ticket = self.preview.begin();
        vec![Effect::RequestPreview {
            ticket,
            mapping: session.working().clone(),
            engine: self.engine.clone(),
        }]
    }

    fn handle_save(&mut self) -> Vec<Effect> {
        if self.phase != ViewPhase::Ready {
            return Vec::new();
        }
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        match self.gateway.begin_save(session) {
            Ok(mapping) => {
                self.phase = ViewPhase::Saving;
                vec![Effect::Save(mapping)]
            }
            Err(e) => {
                debug!(error = %e, "save not started");
                Vec::new()
            }
        }
    }

    fn handle_saved(
        &mut self,
        result: Result<ProcessResponse, ClientError>,
    ) -> Vec<Effect> {
        if self.phase != ViewPhase::Saving {
            warn!(phase = ?self.phase, "ignoring save result outside of saving");
            return Vec::new();
        }
        self.phase = ViewPhase::Ready;
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match self.gateway.finish_save(session, result) {
            Ok(()) => {
                self.saved = Some(session.original().clone());
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!(
                    "The schema could not be saved: {}",
                    AlignError::user_message(&e)
                ));
            }
        }
        if std::mem::take(&mut self.discard_after_save) {
            self.gateway.discard(session);
            return self.refresh_preview();
        }
        Vec::new()
    }

    fn handle_discard(&mut self) -> Vec<Effect> {
        if self.phase != ViewPhase::Ready {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if !session.is_dirty() {
            return Vec::new();
        }
        self.gateway.discard(session);
        self.refresh_preview()
    }
}

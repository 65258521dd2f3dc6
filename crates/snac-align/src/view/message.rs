//! Events and effects of the alignment view.

use std::sync::Arc;

use snac_client::{ClientError, EngineConfig, PreviewResult, ProcessResponse};
use snac_model::{ColumnMapping, SchemaModel, SchemaType};

use crate::preview::PreviewTicket;

/// Tabs of the alignment panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Schema,
    Warnings,
    Preview,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Schema, Tab::Warnings, Tab::Preview];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Schema => "Schema",
            Self::Warnings => "Warnings",
            Self::Preview => "Preview",
        }
    }
}

/// Everything that can happen to the view.
///
/// User interactions and completed host requests both arrive here and are
/// processed by [`super::AlignmentView::update`].
#[derive(Debug, Clone)]
pub enum Message {
    // =========================================================================
    // Lifecycle
    // =========================================================================
    /// Open the panel, or re-focus it if already open.
    Launch,
    /// The host's data changed; unsaved edits are discarded.
    HostChanged {
        columns: Vec<String>,
        engine: EngineConfig,
    },

    // =========================================================================
    // Editing
    // =========================================================================
    SetField {
        column: String,
        field: Option<String>,
    },
    SetSchemaType(SchemaType),
    /// Assign fuzzy suggestions at or above the given confidence.
    ApplySuggestions(f32),
    SwitchTab(Tab),
    RefreshPreview,
    Save,
    Discard,
    DismissError,

    // =========================================================================
    // Background task results
    // =========================================================================
    ModelLoaded(Result<Arc<SchemaModel>, ClientError>),
    PreviewReady {
        ticket: PreviewTicket,
        result: Result<PreviewResult, ClientError>,
    },
    Saved(Result<ProcessResponse, ClientError>),
}

/// Work requested by [`super::AlignmentView::update`].
///
/// Effects are executed by a driver; their results come back as messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    RequestPreview {
        ticket: PreviewTicket,
        mapping: ColumnMapping,
        engine: EngineConfig,
    },
    Save(ColumnMapping),
    /// Bring the already-open panel to the front.
    Focus,
}

//! Rendering of the view state into plain data.

use serde::Serialize;
use snac_client::PreviewResult;
use snac_model::{SchemaType, Warning};

use super::{AlignmentView, Tab, ViewPhase};
use crate::preview::PreviewPanel;
use crate::session::AlignmentSession;

/// Everything a front end needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentViewModel {
    pub phase: String,
    pub active_tab: String,
    pub schema_types: Vec<SchemaTypeTab>,
    pub rows: Vec<ColumnRow>,
    pub palette: Vec<PaletteItem>,
    pub warnings: WarningsPanel,
    pub preview: PreviewPanelModel,
    pub save_enabled: bool,
    pub discard_enabled: bool,
    pub unsaved: bool,
    pub error: Option<String>,
}

/// Schema type selector entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaTypeTab {
    pub schema_type: SchemaType,
    pub label: &'static str,
    pub container_id: &'static str,
    pub css_scope: &'static str,
    pub active: bool,
}

/// One dataset column with its field selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRow {
    pub column: String,
    pub selected: Option<String>,
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub name: String,
    /// Held by another column.
    pub disabled: bool,
}

/// Field list shown next to the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteItem {
    pub name: String,
    pub tooltip: String,
    pub required: bool,
    pub used: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarningsPanel {
    pub count: usize,
    pub items: Vec<Warning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewPanelModel {
    pub explanation: String,
    pub items: Vec<String>,
    pub loading: bool,
    /// Banner text when the host rejected the mapping or was unreachable.
    pub banner: Option<String>,
}

impl AlignmentView {
    /// Renders the current state.
    pub fn view_model(&self) -> AlignmentViewModel {
        let session = self.session.as_ref();
        let active_type = session.map(|s| s.working().schema_type).unwrap_or_default();

        let schema_types = SchemaType::ALL
            .iter()
            .map(|t| {
                let info = t.info();
                SchemaTypeTab {
                    schema_type: *t,
                    label: info.label,
                    container_id: info.container_id,
                    css_scope: info.css_scope,
                    active: *t == active_type,
                }
            })
            .collect();

        let (rows, palette, warnings) = match session {
            Some(session) => {
                let state = session.state();
                let rows = state
                    .assignments()
                    .into_iter()
                    .map(|a| ColumnRow {
                        column: a.column.to_string(),
                        selected: a.field.map(str::to_string),
                        options: state
                            .available_fields(a.column)
                            .into_iter()
                            .map(|(name, disabled)| FieldOption {
                                name: name.to_string(),
                                disabled,
                            })
                            .collect(),
                    })
                    .collect();
                let palette = session
                    .model()
                    .fields(active_type)
                    .iter()
                    .map(|f| PaletteItem {
                        name: f.name.clone(),
                        tooltip: f.tooltip.clone(),
                        required: f.required,
                        used: session.working().is_field_mapped(&f.name),
                    })
                    .collect();
                let warnings = WarningsPanel {
                    count: session.warnings().len(),
                    items: session.warnings().to_vec(),
                };
                (rows, palette, warnings)
            }
            None => (Vec::new(), Vec::new(), WarningsPanel::default()),
        };

        let dirty = session.is_some_and(AlignmentSession::is_dirty);
        let ready = self.phase == ViewPhase::Ready;

        AlignmentViewModel {
            phase: format!("{:?}", self.phase),
            active_tab: self.tab.label().to_string(),
            schema_types,
            rows,
            palette,
            warnings,
            preview: render_preview(self.preview.panel(), active_type),
            save_enabled: ready && session.is_some_and(AlignmentSession::can_save),
            discard_enabled: ready && dirty,
            unsaved: dirty,
            error: self.error.clone(),
        }
    }

    /// Label of a tab, with the warning count on the warnings tab.
    pub fn tab_title(&self, tab: Tab) -> String {
        match (tab, self.session.as_ref()) {
            (Tab::Warnings, Some(session)) if !session.warnings().is_empty() => {
                format!("{} ({})", tab.label(), session.warnings().len())
            }
            _ => tab.label().to_string(),
        }
    }
}

fn render_preview(panel: &PreviewPanel, schema_type: SchemaType) -> PreviewPanelModel {
    match panel {
        PreviewPanel::Idle => PreviewPanelModel {
            explanation: explanation(schema_type, &PreviewResult::default()),
            ..PreviewPanelModel::default()
        },
        PreviewPanel::Loading => PreviewPanelModel {
            explanation: explanation(schema_type, &PreviewResult::default()),
            loading: true,
            ..PreviewPanelModel::default()
        },
        PreviewPanel::Ready(result) => PreviewPanelModel {
            explanation: explanation(schema_type, result),
            items: result.sample_items.clone(),
            loading: false,
            banner: None,
        },
        PreviewPanel::InvalidSchema(message) => PreviewPanelModel {
            explanation: explanation(schema_type, &PreviewResult::default()),
            banner: Some(format!("Invalid schema: {message}")),
            ..PreviewPanelModel::default()
        },
        PreviewPanel::Unavailable(message) => PreviewPanelModel {
            explanation: explanation(schema_type, &PreviewResult::default()),
            banner: Some(message.clone()),
            ..PreviewPanelModel::default()
        },
    }
}

fn explanation(schema_type: SchemaType, result: &PreviewResult) -> String {
    format!(
        "Showing the first {} of {} {} items.",
        result.sample_items.len(),
        result.total_item_count,
        schema_type.label().to_lowercase()
    )
}

//! Subcommand implementations.

use std::fs;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use snac_align::{
    AlignmentSession, AlignmentView, JobKind, Message, PersistenceGateway, SchemaModelProvider,
    dispatch, export, start_job,
};
use snac_cli::output::{
    migration_table, model_table, preferences_table, preview_table, process_summary,
    suggestions_table, warnings_table,
};
use snac_cli::settings::{HostOverrides, Settings};
use snac_client::{EngineConfig, HostClient, PreferencesUpdate};
use snac_map::{AlignmentState, SuggestionEngine, migrate_mapping};
use snac_model::{ColumnMapping, SchemaModel, SchemaType};
use snac_validate::ValidationReport;
use tracing::{info, warn};

use crate::cli::{
    CheckArgs, ExportArgs, JobArgs, MappingArgs, MigrateArgs, ModelArgs, ModelSource,
    PreferencesArgs, SuggestArgs,
};

/// Settings and host overrides shared by every command.
pub struct CommandContext {
    pub settings: Settings,
    pub overrides: HostOverrides,
}

impl CommandContext {
    fn client(&self) -> Result<HostClient> {
        let config = self.settings.client_config(&self.overrides)?;
        Ok(HostClient::new(config)?)
    }

    async fn model(&self, source: ModelSource) -> Result<Arc<SchemaModel>> {
        if source.offline {
            return Ok(Arc::new(SchemaModel::builtin()));
        }
        let client = self.client()?;
        let mut provider = SchemaModelProvider::new();
        let model = with_spinner("Loading schema model", provider.load(&client)).await?;
        Ok(model)
    }
}

pub async fn run_model(ctx: &CommandContext, args: &ModelArgs) -> Result<i32> {
    let model = ctx.model(args.source).await?;
    let schema_type = SchemaType::from(args.schema_type);
    println!("{} fields:", schema_type.label());
    println!("{}", model_table(&model, schema_type));
    Ok(0)
}

pub async fn run_check(ctx: &CommandContext, args: &CheckArgs) -> Result<i32> {
    let mut mapping = read_mapping(&args.mapping)?;
    if let Some(schema_type) = args.schema_type {
        mapping.schema_type = schema_type.into();
    }
    let model = ctx.model(args.source).await?;

    let report = ValidationReport::new(&mapping, &model);
    let inert = mapping.inert_entries(&model);
    println!(
        "{}: {} of {} required fields mapped.",
        mapping.schema_type.label(),
        report.satisfied(),
        report.required.len()
    );
    if !inert.is_empty() {
        println!("Ignored (not {} fields):", mapping.schema_type.label());
        for (column, field) in inert {
            println!("  {column} -> {field}");
        }
    }
    if report.is_valid() {
        println!("No warnings.");
        Ok(0)
    } else {
        println!("{}", warnings_table(&report.warnings));
        Ok(1)
    }
}

pub async fn run_suggest(ctx: &CommandContext, args: &SuggestArgs) -> Result<i32> {
    let model = ctx.model(args.source).await?;
    let schema_type = SchemaType::from(args.schema_type);
    let min_confidence = args
        .min_confidence
        .unwrap_or(ctx.settings.suggest.min_confidence);
    if !(0.0..=1.0).contains(&min_confidence) {
        bail!("--min-confidence must be between 0 and 1, got {min_confidence}");
    }

    let suggestions =
        SuggestionEngine::new(&model, schema_type).suggest_all(&args.columns, min_confidence);
    println!("{}", suggestions_table(&args.columns, &suggestions));

    if let Some(path) = &args.write {
        let mut state = AlignmentState::new(model, args.columns.clone());
        state.set_schema_type(schema_type);
        let applied = state.apply_suggestions(&suggestions);
        write_json(path, state.working())?;
        println!("Wrote {applied} assignments to {}.", path.display());
    }
    Ok(0)
}

pub async fn run_preview(ctx: &CommandContext, args: &MappingArgs) -> Result<i32> {
    let mapping = read_mapping(&args.mapping)?;
    let client = ctx.client()?;
    let columns = mapping.column_mappings.keys().cloned().collect();

    let mut view = AlignmentView::new(columns, Some(mapping), args.engine.engine());
    with_spinner("Rendering preview", dispatch(&mut view, &client, Message::Launch)).await;
    if let Some(error) = view.error() {
        bail!("{error}");
    }

    let rendered = view.view_model();
    if rendered.warnings.count > 0 {
        println!("{}", warnings_table(&rendered.warnings.items));
        return Ok(1);
    }
    if let Some(banner) = &rendered.preview.banner {
        eprintln!("{banner}");
        return Ok(1);
    }
    println!("{}", rendered.preview.explanation);
    println!("{}", preview_table(&rendered.preview.items));
    Ok(0)
}

pub async fn run_save(ctx: &CommandContext, args: &MappingArgs) -> Result<i32> {
    let client = ctx.client()?;
    let model = ctx.model(ModelSource::default()).await?;
    let mut session = session_from_file(&args.mapping, model)?;
    if !session.is_valid() {
        println!("{}", warnings_table(session.warnings()));
        return Ok(1);
    }
    save_session(&client, &mut session).await?;
    println!("Schema saved.");
    Ok(0)
}

pub async fn run_export(ctx: &CommandContext, args: &ExportArgs) -> Result<i32> {
    let mapping = read_mapping(&args.mapping.mapping)?;
    let client = ctx.client()?;
    let engine = args.mapping.engine.engine();
    let today = Local::now().date_naive();

    let doc = with_spinner("Exporting", export(&client, &mapping, &engine, today)).await?;
    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let path = args.output.join(&doc.file_name);
    write_json(&path, &doc.document)?;
    println!("Exported to {}.", path.display());
    Ok(0)
}

pub async fn run_job(ctx: &CommandContext, kind: JobKind, args: &JobArgs) -> Result<i32> {
    let client = ctx.client()?;
    let model = ctx.model(ModelSource::default()).await?;
    let mut session = session_from_file(&args.mapping, model)?;
    if !session.is_valid() {
        println!("{}", warnings_table(session.warnings()));
        return Ok(1);
    }
    save_session(&client, &mut session).await?;

    let engine: EngineConfig = args.engine.engine();
    let response = with_spinner(
        &format!("Starting {}", kind.label()),
        start_job(&client, kind, session.saved_schema(), &engine),
    )
    .await?;
    println!("{}", process_summary(kind.label(), &response));
    Ok(0)
}

pub async fn run_preferences(ctx: &CommandContext, args: &PreferencesArgs) -> Result<i32> {
    let client = ctx.client()?;
    let mut preferences = with_spinner("Loading preferences", client.preferences()).await?;

    if args.is_update() {
        let mut update = PreferencesUpdate::from_current(&preferences);
        if let Some(env) = &args.env {
            update.env.clone_from(env);
        }
        if let Some(key) = &args.key_dev {
            update.key_dev.clone_from(key);
        }
        if let Some(key) = &args.key_prod {
            update.key_prod.clone_from(key);
        }
        if let Some(max) = args.max_preview_items {
            update.max_preview_items = max;
        }
        if let Some(include) = args.include_api_response {
            update.include_api_response = include;
        }
        preferences =
            with_spinner("Saving preferences", client.save_preferences(&update)).await?;
        info!(env = %preferences.env, "preferences saved");
    }

    println!("{}", preferences_table(&preferences));
    println!("Preview items: {}", preferences.preview.max_items);
    println!(
        "Include API response: {}",
        if preferences.upload.api_response { "yes" } else { "no" }
    );
    Ok(0)
}

pub async fn run_migrate(ctx: &CommandContext, args: &MigrateArgs) -> Result<i32> {
    let Some(path) = &args.mapping else {
        let client = ctx.client()?;
        let status = with_spinner("Migrating saved schemas", client.migrate_schema()).await?;
        if status.message.is_empty() {
            println!("Migration {}.", status.status);
        } else {
            println!("Migration {}: {}", status.status, status.message);
        }
        return Ok(0);
    };

    let mapping = read_mapping(path)?;
    let model = ctx.model(args.source).await?;
    let (migrated, report) = migrate_mapping(&mapping, &model);
    if report.renamed.is_empty() && report.unrecognized.is_empty() {
        println!("Nothing to migrate.");
        return Ok(0);
    }
    println!("{}", migration_table(&report));
    if !report.is_noop() {
        write_json(path, &migrated)?;
        println!("Rewrote {}.", path.display());
    }
    Ok(0)
}

/// Builds an unsaved session holding the file's mapping.
///
/// Previous field names are migrated first. Entries that are not fields of the
/// mapping's schema type are skipped.
fn session_from_file(path: &Path, model: Arc<SchemaModel>) -> Result<AlignmentSession> {
    let (mapping, report) = migrate_mapping(&read_mapping(path)?, &model);
    for (column, previous, current) in &report.renamed {
        info!(column, previous, current, "using current field name");
    }
    for (column, field) in &report.unrecognized {
        warn!(column, field, "skipping entry that is not a field of this schema type");
    }

    let columns = mapping.column_mappings.keys().cloned().collect();
    let mut session = AlignmentSession::new(model, columns, None);
    session.batch(|state| -> snac_map::Result<()> {
        state.set_schema_type(mapping.schema_type);
        for (column, field) in &mapping.column_mappings {
            if report.unrecognized.iter().any(|(c, _)| c == column) {
                continue;
            }
            state.set_field_for_column(column, Some(field))?;
        }
        Ok(())
    })?;
    Ok(session)
}

async fn save_session(client: &HostClient, session: &mut AlignmentSession) -> Result<()> {
    let mut gateway = PersistenceGateway::new();
    with_spinner("Saving schema", gateway.save(client, session)).await?;
    Ok(())
}

fn read_mapping(path: &Path) -> Result<ColumnMapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mapping = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a mapping file", path.display()))?;
    Ok(mapping)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Shows a spinner on stderr while `future` runs.
async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = future.await;
    spinner.finish_and_clear();
    output
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use snac_client::EngineConfig;
use snac_model::SchemaType;

#[derive(Parser)]
#[command(
    name = "snac-align",
    version,
    about = "Align dataset columns with SNAC schema fields",
    long_about = "Align the columns of a data-cleaning project with the fields of a SNAC \
                  schema.\n\nChecks mappings for missing required fields, suggests \
                  assignments, previews and saves schemas on the host, and starts \
                  uploads and validation runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub host: HostArgs,

    /// Settings file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct HostArgs {
    /// Base URL of the host.
    #[arg(long = "host-url", env = "SNAC_HOST_URL", global = true)]
    pub host_url: Option<String>,

    /// Project the commands act on.
    #[arg(long = "project", env = "SNAC_PROJECT", global = true)]
    pub project: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the fields of a schema type.
    Model(ModelArgs),

    /// Report missing required fields in a mapping file.
    Check(CheckArgs),

    /// Suggest field assignments for dataset columns.
    Suggest(SuggestArgs),

    /// Show the records a mapping produces.
    Preview(MappingArgs),

    /// Save a mapping as the project's schema.
    Save(MappingArgs),

    /// Export the records a mapping produces as JSON.
    Export(ExportArgs),

    /// Upload the project's records.
    Upload(JobArgs),

    /// Validate the project's records against SNAC.
    Validate(JobArgs),

    /// Show or change the host preferences.
    Preferences(PreferencesArgs),

    /// Rewrite renamed field names in saved schemas.
    Migrate(MigrateArgs),
}

/// Where the field catalog comes from.
#[derive(Args, Clone, Copy, Default)]
pub struct ModelSource {
    /// Use the built-in catalog instead of asking the host.
    #[arg(long = "offline")]
    pub offline: bool,
}

#[derive(Args)]
pub struct ModelArgs {
    /// Schema type to list.
    #[arg(long = "type", value_enum, default_value = "resource")]
    pub schema_type: SchemaTypeArg,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Mapping file in the project's JSON format.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Check against this schema type instead of the file's.
    #[arg(long = "type", value_enum)]
    pub schema_type: Option<SchemaTypeArg>,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Dataset column names.
    #[arg(long = "columns", value_delimiter = ',', num_args = 1.., required = true)]
    pub columns: Vec<String>,

    #[arg(long = "type", value_enum, default_value = "resource")]
    pub schema_type: SchemaTypeArg,

    /// Confidence floor between 0 and 1 (default from settings).
    #[arg(long = "min-confidence")]
    pub min_confidence: Option<f32>,

    /// Write the suggested mapping to this file.
    #[arg(long = "write", value_name = "FILE")]
    pub write: Option<PathBuf>,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Args)]
pub struct EngineArgs {
    /// Treat the project as record-based instead of row-based.
    #[arg(long = "record-based")]
    pub record_based: bool,
}

impl EngineArgs {
    pub fn engine(&self) -> EngineConfig {
        if self.record_based {
            EngineConfig::record_based()
        } else {
            EngineConfig::default()
        }
    }
}

#[derive(Args)]
pub struct MappingArgs {
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Directory the export is written to.
    #[arg(long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct JobArgs {
    /// Mapping to save before the job starts.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Default)]
pub struct PreferencesArgs {
    /// Active environment id.
    #[arg(long = "env")]
    pub env: Option<String>,

    #[arg(long = "key-dev")]
    pub key_dev: Option<String>,

    #[arg(long = "key-prod")]
    pub key_prod: Option<String>,

    #[arg(long = "max-preview-items")]
    pub max_preview_items: Option<u32>,

    #[arg(long = "include-api-response")]
    pub include_api_response: Option<bool>,
}

impl PreferencesArgs {
    pub fn is_update(&self) -> bool {
        self.env.is_some()
            || self.key_dev.is_some()
            || self.key_prod.is_some()
            || self.max_preview_items.is_some()
            || self.include_api_response.is_some()
    }
}

#[derive(Args)]
pub struct MigrateArgs {
    /// Migrate this mapping file in place instead of the host's schemas.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaTypeArg {
    Resource,
    Entity,
    Relation,
}

impl From<SchemaTypeArg> for SchemaType {
    fn from(arg: SchemaTypeArg) -> Self {
        match arg {
            SchemaTypeArg::Resource => SchemaType::Resource,
            SchemaTypeArg::Entity => SchemaType::Entity,
            SchemaTypeArg::Relation => SchemaType::Relation,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_suggest_columns() {
        let cli = Cli::try_parse_from([
            "snac-align",
            "suggest",
            "--columns",
            "title,link",
            "--type",
            "entity",
            "--offline",
        ])
        .unwrap();
        let Command::Suggest(args) = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(args.columns, vec!["title", "link"]);
        assert_eq!(SchemaType::from(args.schema_type), SchemaType::Entity);
        assert!(args.source.offline);
    }

    #[test]
    fn preferences_without_flags_is_a_read() {
        let cli = Cli::try_parse_from(["snac-align", "preferences"]).unwrap();
        let Command::Preferences(args) = cli.command else {
            panic!("expected preferences");
        };
        assert!(!args.is_update());
    }

    #[test]
    fn host_flags_are_global() {
        let cli = Cli::try_parse_from([
            "snac-align",
            "preview",
            "--mapping",
            "m.json",
            "--project",
            "1877",
            "--record-based",
        ])
        .unwrap();
        assert_eq!(cli.host.project.as_deref(), Some("1877"));
        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.engine.engine(), EngineConfig::record_based());
    }
}

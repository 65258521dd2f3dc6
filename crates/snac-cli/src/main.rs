//! SNAC schema alignment CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use snac_align::JobKind;
use snac_cli::logging::{LogConfig, LogFormat, init_logging};
use snac_cli::settings::{HostOverrides, load_settings};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{
    CommandContext, run_check, run_export, run_job, run_migrate, run_model, run_preferences,
    run_preview, run_save, run_suggest,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let ctx = CommandContext {
        settings,
        overrides: HostOverrides {
            url: cli.host.host_url.clone(),
            project: cli.host.project.clone(),
        },
    };

    let result = match &cli.command {
        Command::Model(args) => run_model(&ctx, args).await,
        Command::Check(args) => run_check(&ctx, args).await,
        Command::Suggest(args) => run_suggest(&ctx, args).await,
        Command::Preview(args) => run_preview(&ctx, args).await,
        Command::Save(args) => run_save(&ctx, args).await,
        Command::Export(args) => run_export(&ctx, args).await,
        Command::Upload(args) => run_job(&ctx, JobKind::Upload, args).await,
        Command::Validate(args) => run_job(&ctx, JobKind::Validation, args).await,
        Command::Preferences(args) => run_preferences(&ctx, args).await,
        Command::Migrate(args) => run_migrate(&ctx, args).await,
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !cli.verbosity.is_present();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

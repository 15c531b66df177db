// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Homeledger CLI
//!
//! The `homeledger` binary runs household backend operations against an
//! in-process backend seeded from configuration.
//!
//! ## Commands
//!
//! - `homeledger member profile|activate|accept-policy|upgrade|food-groups|waste-report`
//! - `homeledger household list|add-member|remove-member|rename`
//! - `homeledger config show|validate|generate`
//!
//! The acting identity is always explicit: `--caller` (or `HOMELEDGER_CALLER`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use homeledger_cli::commands::{
    self, ConfigCommand, HouseholdCommand, Invocation, MemberCommand, OutputFormat,
};
use homeledger_cli::embedded::EmbeddedBackend;
use homeledger_core::domain::config::BackendConfig;

/// Homeledger - policy-gated household backend
#[derive(Parser)]
#[command(name = "homeledger")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, env = "HOMELEDGER_CONFIG_PATH", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Mail address of the acting household member
    #[arg(long, global = true, env = "HOMELEDGER_CALLER", value_name = "MAIL")]
    caller: Option<String>,

    /// Culture to render results in (default: spec.default_culture)
    #[arg(long, global = true, value_name = "CULTURE")]
    culture: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Print the gate events published by the command
    #[arg(long, global = true)]
    events: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "HOMELEDGER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "HOMELEDGER_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Operations on the caller's own member record
    #[command(name = "member")]
    Member {
        #[command(subcommand)]
        command: MemberCommand,
    },

    /// Household roster and attribute changes
    #[command(name = "household")]
    Household {
        #[command(subcommand)]
        command: HouseholdCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Configuration problems are reported by the command itself; logging falls
    // back to defaults until then.
    let loaded = BackendConfig::load_or_default(cli.config.clone());
    let logging = loaded
        .as_ref()
        .map(|config| config.spec.logging.clone())
        .unwrap_or_default();
    init_logging(
        cli.log_level.as_deref().unwrap_or(&logging.level),
        cli.log_format.as_deref().unwrap_or(&logging.format),
    )?;

    let invocation = Invocation {
        caller: cli.caller.clone(),
        culture: cli.culture.clone(),
        output: cli.output,
        show_events: cli.events,
    };

    match cli.command {
        Some(Commands::Member { command }) => {
            let mut backend = embedded_backend(loaded)?;
            commands::member::handle_command(command, &mut backend, &invocation).await
        }
        Some(Commands::Household { command }) => {
            let mut backend = embedded_backend(loaded)?;
            commands::household::handle_command(command, &mut backend, &invocation).await
        }
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

fn embedded_backend(loaded: Result<BackendConfig>) -> Result<EmbeddedBackend> {
    let config = loaded.context("Failed to load configuration")?;
    info!(backend = %config.metadata.name, "Starting embedded backend");
    EmbeddedBackend::new(&config)
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        other => anyhow::bail!("Unknown log format '{}'. Expected 'compact' or 'json'", other),
    }

    Ok(())
}

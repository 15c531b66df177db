// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use homeledger_core::domain::config::{BackendConfig, CONFIG_PATH_ENV};

pub const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
pub const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./homeledger-config.yaml)
        #[arg(short, long, default_value = "./homeledger-config.yaml")]
        output: PathBuf,

        /// Include seed examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output, examples } => generate(output, examples).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = BackendConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./homeledger-config.yaml");
        println!("  4. ~/.homeledger/config.yaml");
        println!("  5. /etc/homeledger/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Backend:".bold());
    println!("  Name: {}", config.metadata.name);
    println!(
        "  Default culture: {}",
        config.spec.default_culture.as_deref().unwrap_or("(none)")
    );
    println!();

    println!("{}", "Events:".bold());
    println!("  Enabled: {}", config.spec.events.enabled);
    println!("  Capacity: {}", config.spec.events.capacity);
    println!();

    println!("{}", "Logging:".bold());
    println!("  Level: {}", config.spec.logging.level);
    println!("  Format: {}", config.spec.logging.format);
    println!();

    let seed = &config.spec.seed;
    println!("{}", "Seed data:".bold());
    println!("  Locales: {}", seed.locales.join(", "));
    println!("  Members: {}", seed.members.len());
    for member in &seed.members {
        let mut flags = Vec::new();
        if member.activated {
            flags.push("activated");
        }
        if member.privacy_policy_accepted {
            flags.push("policy accepted");
        }
        println!(
            "    - {} ({}) {}",
            member.mail_address,
            member.membership,
            flags.join(", ").dimmed()
        );
    }
    println!("  Households: {}", seed.households.len());
    for household in &seed.households {
        println!("    - {} → {} members", household.name.bold(), household.members.len());
    }
    println!("  Food groups: {}", seed.food_groups.len());
    println!("  Waste entries: {}", seed.waste.len());
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config =
        BackendConfig::load_or_default(config_path).context("Failed to load configuration")?;

    config.validate().context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples { EXAMPLES_TEMPLATE } else { MINIMAL_TEMPLATE };

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!("{}", format!("✓ Configuration generated: {}", output.display()).green());

    Ok(())
}

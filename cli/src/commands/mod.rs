// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the homeledger CLI

pub mod config;
pub mod household;
pub mod member;

pub use self::config::ConfigCommand;
pub use self::household::HouseholdCommand;
pub use self::member::MemberCommand;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use homeledger_core::application::Receipt;
use homeledger_core::domain::events::GateEvent;
use homeledger_core::GateError;

use crate::embedded::EmbeddedBackend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global flags shared by the member and household commands.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub caller: Option<String>,
    pub culture: Option<String>,
    pub output: OutputFormat,
    pub show_events: bool,
}

/// Report a gate rejection and turn it into the command's error.
pub(crate) fn rejected(error: GateError) -> anyhow::Error {
    let label = if error.is_business_error() {
        format!("✗ Request rejected ({})", error.kind())
    } else {
        "✗ Backend failure".to_string()
    };
    eprintln!("{}", label.red());
    anyhow::Error::new(error)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_receipt(receipt: &Receipt, output: OutputFormat, message: &str) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(receipt),
        OutputFormat::Text => {
            println!("{}", format!("✓ {}", message).green());
            println!("  Entity: {}", receipt.entity_id);
            println!("  Persisted: {}", receipt.persisted_at.to_rfc3339());
            Ok(())
        }
    }
}

pub(crate) fn print_events(backend: &mut EmbeddedBackend, invocation: &Invocation) {
    if !invocation.show_events {
        return;
    }
    for event in backend.drain_events() {
        match &event {
            GateEvent::RequestCompleted { gate, operation, .. } => {
                println!("{} {:?} {}", "event".dimmed(), gate, operation.green());
            }
            GateEvent::RequestRejected {
                gate,
                operation,
                error_kind,
                ..
            } => {
                println!("{} {:?} {} {}", "event".dimmed(), gate, operation.red(), error_kind);
            }
        }
    }
}

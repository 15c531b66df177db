// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Household commands
//!
//! Commands: list, add-member, remove-member, rename

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use uuid::Uuid;

use homeledger_core::application::handlers::{MemberRosterRequest, RenameHouseholdRequest};
use homeledger_core::domain::repository::HouseholdRepository;
use homeledger_core::HouseholdId;

use super::{print_events, print_json, print_receipt, rejected, Invocation, OutputFormat};
use crate::embedded::{caller_claim, EmbeddedBackend};

#[derive(Subcommand)]
pub enum HouseholdCommand {
    /// List the caller's households
    List,

    /// Add a member to a household
    AddMember {
        /// Household ID
        #[arg(value_name = "HOUSEHOLD_ID")]
        household_id: Uuid,

        /// Mail address of the member to add
        #[arg(value_name = "MAIL")]
        mail_address: String,
    },

    /// Remove a member from a household
    RemoveMember {
        /// Household ID
        #[arg(value_name = "HOUSEHOLD_ID")]
        household_id: Uuid,

        /// Mail address of the member to remove
        #[arg(value_name = "MAIL")]
        mail_address: String,
    },

    /// Rename a household
    Rename {
        /// Household ID
        #[arg(value_name = "HOUSEHOLD_ID")]
        household_id: Uuid,

        /// New name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

pub async fn handle_command(
    command: HouseholdCommand,
    backend: &mut EmbeddedBackend,
    invocation: &Invocation,
) -> Result<()> {
    let caller = caller_claim(invocation.caller.as_deref())?;
    let service = backend.service();
    let output = invocation.output;

    let outcome = match command {
        HouseholdCommand::List => {
            let households = backend.store().find_by_member(&caller)?;
            if output == OutputFormat::Json {
                print_json(&households)
            } else if households.is_empty() {
                println!("{}", "No households found".yellow());
                Ok(())
            } else {
                println!("{:<38} {:<24} {}", "ID", "NAME", "MEMBERS");
                for household in &households {
                    println!(
                        "{:<38} {:<24} {}",
                        household.id,
                        household.name.bold(),
                        household.members.len()
                    );
                }
                Ok(())
            }
        }
        HouseholdCommand::AddMember {
            household_id,
            mail_address,
        } => {
            let request = MemberRosterRequest {
                household_id: HouseholdId(household_id),
                mail_address,
            };
            service
                .add_household_member(&caller, &request)
                .map_err(rejected)
                .and_then(|receipt| print_receipt(&receipt, output, "Member added"))
        }
        HouseholdCommand::RemoveMember {
            household_id,
            mail_address,
        } => {
            let request = MemberRosterRequest {
                household_id: HouseholdId(household_id),
                mail_address,
            };
            service
                .remove_household_member(&caller, &request)
                .map_err(rejected)
                .and_then(|receipt| print_receipt(&receipt, output, "Member removed"))
        }
        HouseholdCommand::Rename { household_id, name } => {
            let request = RenameHouseholdRequest {
                household_id: HouseholdId(household_id),
                name,
            };
            service
                .rename_household(&caller, &request)
                .map_err(rejected)
                .and_then(|receipt| print_receipt(&receipt, output, "Household renamed"))
        }
    };

    print_events(backend, invocation);
    outcome
}

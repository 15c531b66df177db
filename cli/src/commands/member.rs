// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Member commands
//!
//! Commands: profile, activate, accept-policy, upgrade, food-groups, waste-report

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use homeledger_core::application::handlers::{
    AcceptPrivacyPolicyRequest, ActivateAccountRequest, LocalizedQuery, UpgradeMembershipRequest,
};
use homeledger_core::infrastructure::renderer::{
    FoodGroupView, LocalizedView, MemberView, WasteReportView,
};
use homeledger_core::MembershipTier;

use super::{print_events, print_json, rejected, Invocation, OutputFormat};
use crate::embedded::{caller_claim, EmbeddedBackend};

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Show the caller's member profile
    Profile,

    /// Activate the caller's account
    Activate,

    /// Accept the current privacy policy
    AcceptPolicy,

    /// Upgrade the caller's membership
    Upgrade {
        /// Target tier (deluxe, premium)
        #[arg(value_name = "TIER")]
        tier: MembershipTier,

        /// Membership period in days
        #[arg(long, default_value_t = 365)]
        days: u32,
    },

    /// List food groups in the caller's culture
    FoodGroups,

    /// Food-waste totals across the caller's households (deluxe)
    WasteReport,
}

pub async fn handle_command(
    command: MemberCommand,
    backend: &mut EmbeddedBackend,
    invocation: &Invocation,
) -> Result<()> {
    let caller = caller_claim(invocation.caller.as_deref())?;
    let locale_id = backend.locale_for(invocation.culture.as_deref())?;
    let service = backend.service();
    let output = invocation.output;

    let outcome = match command {
        MemberCommand::Profile => service
            .get_member_profile(&caller, &LocalizedQuery { locale_id })
            .map_err(rejected)
            .and_then(|view| print_member(&view, output, None)),
        MemberCommand::Activate => service
            .activate_account(&caller, &ActivateAccountRequest { locale_id })
            .map_err(rejected)
            .and_then(|view| print_member(&view, output, Some("Account activated"))),
        MemberCommand::AcceptPolicy => service
            .accept_privacy_policy(&caller, &AcceptPrivacyPolicyRequest { locale_id })
            .map_err(rejected)
            .and_then(|view| print_member(&view, output, Some("Privacy policy accepted"))),
        MemberCommand::Upgrade { tier, days } => {
            let request = UpgradeMembershipRequest {
                tier,
                duration_days: days,
                locale_id,
            };
            service
                .upgrade_membership(&caller, &request)
                .map_err(rejected)
                .and_then(|view| print_member(&view, output, Some("Membership upgraded")))
        }
        MemberCommand::FoodGroups => service
            .list_food_groups(&caller, &LocalizedQuery { locale_id })
            .map_err(rejected)
            .and_then(|view| print_food_groups(&view, output)),
        MemberCommand::WasteReport => service
            .get_waste_report(&caller, &LocalizedQuery { locale_id })
            .map_err(rejected)
            .and_then(|view| print_waste_report(&view, output)),
    };

    print_events(backend, invocation);
    outcome
}

fn print_member(
    view: &LocalizedView<MemberView>,
    output: OutputFormat,
    message: Option<&str>,
) -> Result<()> {
    if output == OutputFormat::Json {
        return print_json(view);
    }

    if let Some(message) = message {
        println!("{}", format!("✓ {}", message).green());
    }
    let member = &view.data;
    let dash = || "-".dimmed().to_string();
    println!("{}", member.mail_address.bold());
    println!("  ID: {}", member.id);
    println!("  Registered: {}", member.registered_on);
    println!("  Activated: {}", member.activated_on.clone().unwrap_or_else(dash));
    println!(
        "  Privacy policy accepted: {}",
        member.privacy_policy_accepted_on.clone().unwrap_or_else(dash)
    );
    match &member.membership_expires_on {
        Some(expires) => println!("  Membership: {} (until {})", member.membership, expires),
        None => println!("  Membership: {}", member.membership),
    }
    Ok(())
}

fn print_food_groups(view: &LocalizedView<Vec<FoodGroupView>>, output: OutputFormat) -> Result<()> {
    if output == OutputFormat::Json {
        return print_json(view);
    }

    if view.data.is_empty() {
        println!("{}", "No food groups found".yellow());
        return Ok(());
    }

    println!("{:<38} {}", "ID", "NAME");
    for group in &view.data {
        println!("{:<38} {}", group.id, group.name);
    }
    Ok(())
}

fn print_waste_report(view: &LocalizedView<WasteReportView>, output: OutputFormat) -> Result<()> {
    if output == OutputFormat::Json {
        return print_json(view);
    }

    let report = &view.data;
    println!("{} ({} households)", "Food waste".bold(), report.households);
    for line in &report.lines {
        println!("  {:<24} {:>10}", line.food_group, line.amount);
    }
    println!("  {:<24} {:>10}", "Total".bold(), report.total);
    if let Some(on) = &report.last_recorded_on {
        println!("  Last recorded: {}", on);
    }
    Ok(())
}

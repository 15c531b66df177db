// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod handlers;
pub mod household_gate;
pub mod member_gate;
pub mod request;
pub mod service;
mod telemetry;

pub use household_gate::{HouseholdCommand, HouseholdGate};
pub use member_gate::{MemberCommand, MemberGate, MemberPolicy, MemberQuery};
pub use request::{HouseholdRequest, LocalizedRequest, Receipt, ResultRenderer};
pub use service::{Collaborators, HouseholdService};

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Concrete operations plugged into the gates.

pub mod household_commands;
pub mod member_commands;
pub mod member_queries;

pub use household_commands::{
    AddHouseholdMember, MemberRosterRequest, RemoveHouseholdMember, RenameHousehold,
    RenameHouseholdRequest,
};
pub use member_commands::{
    AcceptPrivacyPolicy, AcceptPrivacyPolicyRequest, ActivateAccount, ActivateAccountRequest,
    UpgradeMembership, UpgradeMembershipRequest,
};
pub use member_queries::{GetMemberProfile, GetWasteReport, ListFoodGroups, LocalizedQuery};

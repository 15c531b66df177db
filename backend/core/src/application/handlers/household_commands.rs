// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Household roster and attribute mutations.
//!
//! Target addresses arrive as raw strings; well-formedness is one of the rules
//! so that a malformed address is reported as a validation failure.

use chrono::Utc;
use serde::Deserialize;

use crate::application::household_gate::HouseholdCommand;
use crate::application::request::HouseholdRequest;
use crate::domain::errors::GateError;
use crate::domain::household::{Household, HouseholdError, HouseholdId};
use crate::domain::mail::MailAddress;
use crate::domain::rule_chain::RuleChain;

pub const MAX_HOUSEHOLD_NAME_CHARS: usize = 100;

const MAIL_FIELD: &str = "mail_address";

fn parse_target(raw: &str) -> Result<MailAddress, GateError> {
    MailAddress::parse(raw).map_err(|e| GateError::validation(MAIL_FIELD, e.to_string()))
}

fn roster_error(error: HouseholdError) -> GateError {
    GateError::validation(MAIL_FIELD, error.to_string())
}

fn is_member(household: &Household, raw: &str) -> bool {
    MailAddress::parse(raw)
        .map(|mail| household.contains(&mail))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberRosterRequest {
    pub household_id: HouseholdId,
    pub mail_address: String,
}

impl HouseholdRequest for MemberRosterRequest {
    fn household_id(&self) -> HouseholdId {
        self.household_id
    }

    fn target_mail_address(&self) -> Option<&str> {
        Some(&self.mail_address)
    }
}

#[derive(Debug, Default)]
pub struct AddHouseholdMember;

impl HouseholdCommand for AddHouseholdMember {
    type Request = MemberRosterRequest;

    fn name(&self) -> &'static str {
        "add_household_member"
    }

    fn add_validation_rules<'a>(
        &self,
        household: &'a Household,
        request: &'a Self::Request,
        chain: &mut RuleChain<'a>,
    ) {
        let raw = request.mail_address.trim();
        chain
            .is_satisfied_by(
                move || MailAddress::is_well_formed(raw),
                GateError::validation(MAIL_FIELD, "is not a valid mail address"),
            )
            .is_satisfied_by(
                move || !is_member(household, raw),
                GateError::validation(MAIL_FIELD, "is already a member of this household"),
            );
    }

    fn modify_data(
        &self,
        mut household: Household,
        request: &Self::Request,
    ) -> Result<Household, GateError> {
        let mail = parse_target(&request.mail_address)?;
        household.add_member(mail, Utc::now()).map_err(roster_error)?;
        Ok(household)
    }
}

#[derive(Debug, Default)]
pub struct RemoveHouseholdMember;

impl HouseholdCommand for RemoveHouseholdMember {
    type Request = MemberRosterRequest;

    fn name(&self) -> &'static str {
        "remove_household_member"
    }

    fn add_validation_rules<'a>(
        &self,
        household: &'a Household,
        request: &'a Self::Request,
        chain: &mut RuleChain<'a>,
    ) {
        let raw = request.mail_address.trim();
        chain
            .is_satisfied_by(
                move || MailAddress::is_well_formed(raw),
                GateError::validation(MAIL_FIELD, "is not a valid mail address"),
            )
            .is_satisfied_by(
                move || is_member(household, raw),
                GateError::validation(MAIL_FIELD, "is not a member of this household"),
            );
    }

    fn modify_data(
        &self,
        mut household: Household,
        request: &Self::Request,
    ) -> Result<Household, GateError> {
        let mail = parse_target(&request.mail_address)?;
        household.remove_member(&mail, Utc::now()).map_err(roster_error)?;
        Ok(household)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameHouseholdRequest {
    pub household_id: HouseholdId,
    pub name: String,
}

impl HouseholdRequest for RenameHouseholdRequest {
    fn household_id(&self) -> HouseholdId {
        self.household_id
    }
}

#[derive(Debug, Default)]
pub struct RenameHousehold;

impl HouseholdCommand for RenameHousehold {
    type Request = RenameHouseholdRequest;

    fn name(&self) -> &'static str {
        "rename_household"
    }

    fn add_validation_rules<'a>(
        &self,
        _household: &'a Household,
        request: &'a Self::Request,
        chain: &mut RuleChain<'a>,
    ) {
        let name = request.name.trim();
        chain
            .is_satisfied_by(
                move || !name.is_empty(),
                GateError::validation("name", "must not be empty"),
            )
            .is_satisfied_by(
                move || name.chars().count() <= MAX_HOUSEHOLD_NAME_CHARS,
                GateError::validation(
                    "name",
                    format!("must be at most {} characters", MAX_HOUSEHOLD_NAME_CHARS),
                ),
            );
    }

    fn modify_data(
        &self,
        mut household: Household,
        request: &Self::Request,
    ) -> Result<Household, GateError> {
        household.rename(request.name.trim(), Utc::now());
        Ok(household)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household() -> Household {
        Household::new("H1", MailAddress::parse("bob@example.com").unwrap(), Utc::now())
    }

    fn roster(household: &Household, mail: &str) -> MemberRosterRequest {
        MemberRosterRequest {
            household_id: household.id,
            mail_address: mail.to_string(),
        }
    }

    fn evaluate<C: HouseholdCommand>(
        command: &C,
        household: &Household,
        request: &C::Request,
    ) -> Result<(), GateError> {
        let mut chain = RuleChain::new();
        command.add_validation_rules(household, request, &mut chain);
        chain.evaluate()
    }

    #[test]
    fn test_add_rejects_malformed_and_duplicate() {
        let h = household();
        assert_eq!(
            evaluate(&AddHouseholdMember, &h, &roster(&h, "carol")),
            Err(GateError::validation(MAIL_FIELD, "is not a valid mail address"))
        );
        assert_eq!(
            evaluate(&AddHouseholdMember, &h, &roster(&h, "BOB@example.com")),
            Err(GateError::validation(MAIL_FIELD, "is already a member of this household"))
        );
        assert_eq!(
            evaluate(&AddHouseholdMember, &h, &roster(&h, "carol@example.com")),
            Ok(())
        );
    }

    #[test]
    fn test_add_then_remove() {
        let h = household();
        let added = AddHouseholdMember
            .modify_data(h.clone(), &roster(&h, "carol@example.com"))
            .unwrap();
        assert!(added.contains(&MailAddress::parse("carol@example.com").unwrap()));

        let removal = roster(&added, "carol@example.com");
        assert_eq!(evaluate(&RemoveHouseholdMember, &added, &removal), Ok(()));
        let removed = RemoveHouseholdMember.modify_data(added.clone(), &removal).unwrap();
        assert_eq!(removed.members.len(), 1);
    }

    #[test]
    fn test_remove_requires_membership() {
        let h = household();
        assert_eq!(
            evaluate(&RemoveHouseholdMember, &h, &roster(&h, "dave@example.com")),
            Err(GateError::validation(MAIL_FIELD, "is not a member of this household"))
        );
    }

    #[test]
    fn test_rename_rules() {
        let h = household();
        let blank = RenameHouseholdRequest {
            household_id: h.id,
            name: "   ".to_string(),
        };
        assert_eq!(
            evaluate(&RenameHousehold, &h, &blank),
            Err(GateError::validation("name", "must not be empty"))
        );

        let long = RenameHouseholdRequest {
            household_id: h.id,
            name: "x".repeat(MAX_HOUSEHOLD_NAME_CHARS + 1),
        };
        assert!(evaluate(&RenameHousehold, &h, &long).is_err());

        let ok = RenameHouseholdRequest {
            household_id: h.id,
            name: "  Flat 4b ".to_string(),
        };
        assert_eq!(RenameHousehold.modify_data(h.clone(), &ok).unwrap().name, "Flat 4b");
    }
}

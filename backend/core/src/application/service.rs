// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Household Service
//!
//! Application façade wiring the two gates to the concrete handlers and the
//! [`ViewRenderer`]. Every public method is one operation offered to callers;
//! the gates decide whether it runs.

use std::sync::Arc;

use super::handlers::{
    AcceptPrivacyPolicy, AcceptPrivacyPolicyRequest, ActivateAccount, ActivateAccountRequest,
    AddHouseholdMember, GetMemberProfile, GetWasteReport, ListFoodGroups, LocalizedQuery,
    MemberRosterRequest, RemoveHouseholdMember, RenameHousehold, RenameHouseholdRequest,
    UpgradeMembership, UpgradeMembershipRequest,
};
use super::household_gate::HouseholdGate;
use super::member_gate::MemberGate;
use super::request::Receipt;
use crate::domain::errors::GateError;
use crate::domain::mail::MailAddress;
use crate::domain::repository::{
    FoodGroupRepository, HouseholdRepository, IdentityResolver, LocaleResolver, MemberRepository,
};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::renderer::{
    FoodGroupView, LocalizedView, MemberView, ViewRenderer, WasteReportView,
};
use crate::infrastructure::repositories::InMemoryStore;

/// The collaborators both gates and the query handlers depend on.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityResolver>,
    pub locales: Arc<dyn LocaleResolver>,
    pub members: Arc<dyn MemberRepository>,
    pub households: Arc<dyn HouseholdRepository>,
    pub food_groups: Arc<dyn FoodGroupRepository>,
}

impl Collaborators {
    /// Every role served by one store.
    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            identity: store.clone(),
            locales: store.clone(),
            members: store.clone(),
            households: store.clone(),
            food_groups: store,
        }
    }
}

pub struct HouseholdService {
    member_gate: MemberGate,
    household_gate: HouseholdGate,
    list_food_groups: ListFoodGroups,
    waste_report: GetWasteReport,
    renderer: ViewRenderer,
}

impl HouseholdService {
    pub fn new(collaborators: Collaborators, event_bus: Option<EventBus>) -> Self {
        let mut member_gate = MemberGate::new(
            collaborators.identity.clone(),
            collaborators.locales.clone(),
            collaborators.members.clone(),
        );
        let mut household_gate = HouseholdGate::new(
            collaborators.identity.clone(),
            collaborators.households.clone(),
        );
        if let Some(bus) = event_bus {
            member_gate = member_gate.with_event_bus(bus.clone());
            household_gate = household_gate.with_event_bus(bus);
        }

        Self {
            member_gate,
            household_gate,
            list_food_groups: ListFoodGroups::new(collaborators.food_groups.clone()),
            waste_report: GetWasteReport::new(collaborators.households, collaborators.food_groups),
            renderer: ViewRenderer::new(),
        }
    }

    pub fn get_member_profile(
        &self,
        caller: &MailAddress,
        request: &LocalizedQuery,
    ) -> Result<LocalizedView<MemberView>, GateError> {
        self.member_gate.query(caller, &GetMemberProfile, &self.renderer, request)
    }

    pub fn list_food_groups(
        &self,
        caller: &MailAddress,
        request: &LocalizedQuery,
    ) -> Result<LocalizedView<Vec<FoodGroupView>>, GateError> {
        self.member_gate.query(caller, &self.list_food_groups, &self.renderer, request)
    }

    pub fn get_waste_report(
        &self,
        caller: &MailAddress,
        request: &LocalizedQuery,
    ) -> Result<LocalizedView<WasteReportView>, GateError> {
        self.member_gate.query(caller, &self.waste_report, &self.renderer, request)
    }

    pub fn activate_account(
        &self,
        caller: &MailAddress,
        request: &ActivateAccountRequest,
    ) -> Result<LocalizedView<MemberView>, GateError> {
        self.member_gate.command(caller, &ActivateAccount, &self.renderer, request)
    }

    pub fn accept_privacy_policy(
        &self,
        caller: &MailAddress,
        request: &AcceptPrivacyPolicyRequest,
    ) -> Result<LocalizedView<MemberView>, GateError> {
        self.member_gate.command(caller, &AcceptPrivacyPolicy, &self.renderer, request)
    }

    pub fn upgrade_membership(
        &self,
        caller: &MailAddress,
        request: &UpgradeMembershipRequest,
    ) -> Result<LocalizedView<MemberView>, GateError> {
        self.member_gate.command(caller, &UpgradeMembership, &self.renderer, request)
    }

    pub fn add_household_member(
        &self,
        caller: &MailAddress,
        request: &MemberRosterRequest,
    ) -> Result<Receipt, GateError> {
        self.household_gate.execute(caller, &AddHouseholdMember, request)
    }

    pub fn remove_household_member(
        &self,
        caller: &MailAddress,
        request: &MemberRosterRequest,
    ) -> Result<Receipt, GateError> {
        self.household_gate.execute(caller, &RemoveHouseholdMember, request)
    }

    pub fn rename_household(
        &self,
        caller: &MailAddress,
        request: &RenameHouseholdRequest,
    ) -> Result<Receipt, GateError> {
        self.household_gate.execute(caller, &RenameHousehold, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::household::Household;
    use crate::domain::member::{HouseholdMember, MembershipTier};
    use chrono::Utc;

    fn mail(s: &str) -> MailAddress {
        MailAddress::parse(s).unwrap()
    }

    #[test]
    fn test_new_member_walks_through_onboarding() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_member(HouseholdMember::register(mail("carol@example.com"), Utc::now()));
        let service = HouseholdService::new(Collaborators::from_store(store.clone()), None);
        let carol = mail("carol@example.com");

        let query = LocalizedQuery::default();
        assert_eq!(service.get_member_profile(&carol, &query), Err(GateError::ActorNotActivated));

        service.activate_account(&carol, &ActivateAccountRequest::default()).unwrap();
        assert_eq!(
            service.get_member_profile(&carol, &query),
            Err(GateError::PrivacyPolicyNotAccepted)
        );

        service
            .accept_privacy_policy(&carol, &AcceptPrivacyPolicyRequest::default())
            .unwrap();
        let profile = service.get_member_profile(&carol, &query).unwrap();
        assert_eq!(profile.data.membership, MembershipTier::Basic);
        assert!(profile.data.activated_on.is_some());
    }

    #[test]
    fn test_rename_returns_receipt_for_household() {
        let store = Arc::new(InMemoryStore::new());
        let household = Household::new("Old", mail("bob@example.com"), Utc::now());
        let id = household.id;
        store.insert_household(household);
        let service = HouseholdService::new(Collaborators::from_store(store.clone()), None);

        let receipt = service
            .rename_household(
                &mail("bob@example.com"),
                &RenameHouseholdRequest {
                    household_id: id,
                    name: "New".to_string(),
                },
            )
            .unwrap();
        assert_eq!(receipt.entity_id, id.0);
        assert_eq!(store.household(id).unwrap().name, "New");
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Household Gate
//!
//! Guards mutations of a household's roster and attributes. Unlike the
//! [`super::member_gate::MemberGate`] there are no standing checks; the request
//! is admitted purely by its rule chain.
//!
//! # Pipeline
//!
//! 1. Resolve the household named by the request (`UnknownIdentifier` if absent)
//! 2. Build the rule chain: the self-modification guard first, then the
//!    handler's `add_validation_rules`
//! 3. Evaluate (fail-fast)
//! 4. `modify_data` on the resolved household
//! 5. Persist through `HouseholdRepository::update` and return a [`Receipt`]
//!
//! Because the guard is the first rule, a request that targets the caller's own
//! mail address is rejected with `SelfModificationRejected` whatever the
//! handler's rules would have said. Members change their own membership through
//! the member-scoped path.

use std::sync::Arc;
use tracing::debug;

use super::request::{HouseholdRequest, Receipt};
use super::telemetry::record_outcome;
use crate::domain::errors::{EntityKind, GateError};
use crate::domain::events::GateKind;
use crate::domain::household::Household;
use crate::domain::mail::MailAddress;
use crate::domain::repository::{HouseholdRepository, IdentityResolver};
use crate::domain::rule_chain::RuleChain;
use crate::infrastructure::event_bus::EventBus;

/// Mutation of a household, performed by a caller on the household's behalf.
pub trait HouseholdCommand: Send + Sync {
    type Request: HouseholdRequest;

    /// Operation name used in logs, metrics and events.
    fn name(&self) -> &'static str;

    fn add_validation_rules<'a>(
        &self,
        household: &'a Household,
        request: &'a Self::Request,
        chain: &mut RuleChain<'a>,
    );

    fn modify_data(
        &self,
        household: Household,
        request: &Self::Request,
    ) -> Result<Household, GateError>;
}

pub struct HouseholdGate {
    identity: Arc<dyn IdentityResolver>,
    households: Arc<dyn HouseholdRepository>,
    event_bus: Option<EventBus>,
}

impl HouseholdGate {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        households: Arc<dyn HouseholdRepository>,
    ) -> Self {
        Self {
            identity,
            households,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn execute<C: HouseholdCommand>(
        &self,
        caller: &MailAddress,
        handler: &C,
        request: &C::Request,
    ) -> Result<Receipt, GateError> {
        let outcome = self.run(caller, handler, request);
        record_outcome(self.event_bus.as_ref(), GateKind::Household, handler.name(), &outcome);
        outcome
    }

    fn run<C: HouseholdCommand>(
        &self,
        caller: &MailAddress,
        handler: &C,
        request: &C::Request,
    ) -> Result<Receipt, GateError> {
        let household_id = request.household_id();
        let household = self
            .identity
            .resolve_household(household_id)?
            .ok_or_else(|| GateError::unknown(EntityKind::Household, household_id))?;

        {
            let mut chain = RuleChain::new();
            Self::guard_self_modification(&mut chain, caller, request.target_mail_address());
            handler.add_validation_rules(&household, request, &mut chain);
            debug!(operation = handler.name(), rules = chain.len(), "Evaluating household rules");
            chain.evaluate()?;
        }

        let updated = handler.modify_data(household, request)?;
        let persisted = self.households.update(updated)?;

        Ok(Receipt::from(&persisted))
    }

    /// Appends the rule that keeps a caller from adding or removing themselves.
    pub fn guard_self_modification<'a>(
        chain: &mut RuleChain<'a>,
        caller: &'a MailAddress,
        target: Option<&'a str>,
    ) {
        if let Some(target) = target {
            chain.is_satisfied_by(
                move || !target.trim().eq_ignore_ascii_case(caller.as_str()),
                GateError::SelfModificationRejected,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_compares_normalised_addresses() {
        let caller = MailAddress::parse("bob@example.com").unwrap();

        let mut chain = RuleChain::new();
        HouseholdGate::guard_self_modification(&mut chain, &caller, Some(" Bob@Example.com "));
        assert_eq!(chain.evaluate(), Err(GateError::SelfModificationRejected));

        let mut chain = RuleChain::new();
        HouseholdGate::guard_self_modification(&mut chain, &caller, Some("carol@example.com"));
        assert_eq!(chain.evaluate(), Ok(()));
    }

    #[test]
    fn test_guard_skipped_without_target() {
        let caller = MailAddress::parse("bob@example.com").unwrap();
        let mut chain = RuleChain::new();
        HouseholdGate::guard_self_modification(&mut chain, &caller, None);
        assert!(chain.is_empty());
    }
}

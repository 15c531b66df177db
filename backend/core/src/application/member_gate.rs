// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Member Gate
//!
//! Guards every operation performed in the name of the calling household member.
//!
//! # Pipeline
//!
//! ```text
//! request ─▶ ResolveLocale ─▶ ResolveIdentity ─▶ CheckActivation ─▶ CheckPrivacyPolicy
//!              (if present)                        (policy flag)       (policy flag)
//!        ─▶ CheckMembershipTier ─▶ Execute (get_data | modify_data + update) ─▶ Render
//! ```
//!
//! Each step either advances or ends the request with exactly one [`GateError`]:
//!
//! | Step | Error |
//! |------|-------|
//! | ResolveLocale | `UnknownIdentifier` |
//! | ResolveIdentity | `ActorNotRegistered` |
//! | CheckActivation | `ActorNotActivated` |
//! | CheckPrivacyPolicy | `PrivacyPolicyNotAccepted` |
//! | CheckMembershipTier | `InsufficientMembership` |
//!
//! Collaborator failures surface as `GateError::Collaborator` at the step
//! that called the collaborator.
//!
//! # Extension points
//!
//! Handlers implement [`MemberQuery`] (read) or [`MemberCommand`] (mutation) and
//! choose their [`MemberPolicy`]. Account activation and privacy-policy
//! acceptance use [`MemberPolicy::unrestricted`] so that a member who is not yet
//! activated can get there.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use super::request::{LocalizedRequest, ResultRenderer};
use super::telemetry::record_outcome;
use crate::domain::errors::{EntityKind, GateError};
use crate::domain::events::GateKind;
use crate::domain::locale::LocaleInfo;
use crate::domain::mail::MailAddress;
use crate::domain::member::{HouseholdMember, MembershipTier};
use crate::domain::repository::{IdentityResolver, LocaleResolver, MemberRepository};
use crate::domain::rule_chain::RuleChain;
use crate::infrastructure::event_bus::EventBus;

/// Standing the acting member must have before an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPolicy {
    pub requires_activation: bool,
    pub requires_privacy_policy_accepted: bool,
    pub required_membership: MembershipTier,
}

impl Default for MemberPolicy {
    fn default() -> Self {
        Self {
            requires_activation: true,
            requires_privacy_policy_accepted: true,
            required_membership: MembershipTier::Basic,
        }
    }
}

impl MemberPolicy {
    /// Only identity resolution applies.
    pub fn unrestricted() -> Self {
        Self {
            requires_activation: false,
            requires_privacy_policy_accepted: false,
            required_membership: MembershipTier::Basic,
        }
    }

    pub fn requiring(tier: MembershipTier) -> Self {
        Self {
            required_membership: tier,
            ..Self::default()
        }
    }
}

/// Read operation executed as the calling member.
pub trait MemberQuery: Send + Sync {
    type Request: LocalizedRequest;
    type Output;

    /// Operation name used in logs, metrics and events.
    fn name(&self) -> &'static str;

    fn policy(&self) -> MemberPolicy {
        MemberPolicy::default()
    }

    fn get_data(
        &self,
        member: &HouseholdMember,
        request: &Self::Request,
        locale: Option<&LocaleInfo>,
    ) -> Result<Self::Output, GateError>;
}

/// Mutation of the calling member. The gate persists the returned member.
pub trait MemberCommand: Send + Sync {
    type Request: LocalizedRequest;

    fn name(&self) -> &'static str;

    fn policy(&self) -> MemberPolicy {
        MemberPolicy::default()
    }

    /// Operation-specific rules, evaluated after the standing checks.
    fn add_validation_rules<'a>(
        &self,
        _member: &'a HouseholdMember,
        _request: &'a Self::Request,
        _chain: &mut RuleChain<'a>,
    ) {
    }

    fn modify_data(
        &self,
        member: HouseholdMember,
        request: &Self::Request,
    ) -> Result<HouseholdMember, GateError>;
}

pub struct MemberGate {
    identity: Arc<dyn IdentityResolver>,
    locales: Arc<dyn LocaleResolver>,
    members: Arc<dyn MemberRepository>,
    event_bus: Option<EventBus>,
}

impl MemberGate {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        locales: Arc<dyn LocaleResolver>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            identity,
            locales,
            members,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Run a read operation as `caller`.
    pub fn query<Q, R>(
        &self,
        caller: &MailAddress,
        handler: &Q,
        renderer: &R,
        request: &Q::Request,
    ) -> Result<R::View, GateError>
    where
        Q: MemberQuery,
        R: ResultRenderer<Q::Output>,
    {
        let outcome = self.run_query(caller, handler, renderer, request);
        record_outcome(self.event_bus.as_ref(), GateKind::Member, handler.name(), &outcome);
        outcome
    }

    /// Run a mutation of `caller`'s own member record.
    pub fn command<C, R>(
        &self,
        caller: &MailAddress,
        handler: &C,
        renderer: &R,
        request: &C::Request,
    ) -> Result<R::View, GateError>
    where
        C: MemberCommand,
        R: ResultRenderer<HouseholdMember>,
    {
        let outcome = self.run_command(caller, handler, renderer, request);
        record_outcome(self.event_bus.as_ref(), GateKind::Member, handler.name(), &outcome);
        outcome
    }

    fn run_query<Q, R>(
        &self,
        caller: &MailAddress,
        handler: &Q,
        renderer: &R,
        request: &Q::Request,
    ) -> Result<R::View, GateError>
    where
        Q: MemberQuery,
        R: ResultRenderer<Q::Output>,
    {
        let (member, locale) = self.admit(caller, &handler.policy(), request)?;

        debug!(operation = handler.name(), "Executing query");
        let data = handler.get_data(&member, request, locale.as_ref())?;

        Ok(renderer.render(data, locale.as_ref()))
    }

    fn run_command<C, R>(
        &self,
        caller: &MailAddress,
        handler: &C,
        renderer: &R,
        request: &C::Request,
    ) -> Result<R::View, GateError>
    where
        C: MemberCommand,
        R: ResultRenderer<HouseholdMember>,
    {
        let (member, locale) = self.admit(caller, &handler.policy(), request)?;

        {
            let mut chain = RuleChain::new();
            handler.add_validation_rules(&member, request, &mut chain);
            chain.evaluate()?;
        }

        debug!(operation = handler.name(), "Executing command");
        let updated = handler.modify_data(member, request)?;
        let persisted = self.members.update(updated)?;

        Ok(renderer.render(persisted, locale.as_ref()))
    }

    /// Steps 1-5: resolve locale and identity, then check standing.
    fn admit(
        &self,
        caller: &MailAddress,
        policy: &MemberPolicy,
        request: &impl LocalizedRequest,
    ) -> Result<(HouseholdMember, Option<LocaleInfo>), GateError> {
        let locale = match request.locale_id() {
            Some(locale_id) => {
                let locale = self
                    .locales
                    .resolve(locale_id)?
                    .ok_or_else(|| GateError::unknown(EntityKind::Locale, locale_id))?;
                debug!(culture = %locale.culture, "Resolved request locale");
                Some(locale)
            }
            None => None,
        };

        let member = self
            .identity
            .resolve_by_claim(caller)?
            .ok_or(GateError::ActorNotRegistered)?;

        Self::standing_rules(&member, policy, Utc::now()).evaluate()?;

        Ok((member, locale))
    }

    /// Steps 3-5 as a rule chain. Checks switched off by `policy` add no rule,
    /// so the corresponding member state is never read.
    pub fn standing_rules<'a>(
        member: &'a HouseholdMember,
        policy: &MemberPolicy,
        now: DateTime<Utc>,
    ) -> RuleChain<'a> {
        let mut chain = RuleChain::new();

        if policy.requires_activation {
            chain.is_satisfied_by(move || member.is_activated(), GateError::ActorNotActivated);
        }

        if policy.requires_privacy_policy_accepted {
            chain.is_satisfied_by(
                move || member.has_accepted_privacy_policy(),
                GateError::PrivacyPolicyNotAccepted,
            );
        }

        let required = policy.required_membership;
        let actual = member.effective_tier(now);
        chain.is_satisfied_by(
            move || actual >= required,
            GateError::InsufficientMembership { required, actual },
        );

        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn member() -> HouseholdMember {
        HouseholdMember::register(MailAddress::parse("alice@example.com").unwrap(), Utc::now())
    }

    #[test]
    fn test_default_policy() {
        let policy = MemberPolicy::default();
        assert!(policy.requires_activation);
        assert!(policy.requires_privacy_policy_accepted);
        assert_eq!(policy.required_membership, MembershipTier::Basic);
        assert_eq!(
            MemberPolicy::requiring(MembershipTier::Premium).required_membership,
            MembershipTier::Premium
        );
    }

    #[test]
    fn test_standing_rules_order() {
        let m = member();
        let policy = MemberPolicy::requiring(MembershipTier::Deluxe);
        let chain = MemberGate::standing_rules(&m, &policy, Utc::now());
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.evaluate(), Err(GateError::ActorNotActivated));
    }

    #[test]
    fn test_disabled_checks_add_no_rules() {
        let m = member();
        let chain = MemberGate::standing_rules(&m, &MemberPolicy::unrestricted(), Utc::now());
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.evaluate(), Ok(()));
    }

    #[test]
    fn test_lapsed_membership_is_insufficient() {
        let mut m = member();
        let now = Utc::now();
        m.activate(now);
        m.accept_privacy_policy(now);
        m.upgrade(MembershipTier::Premium, Some(now - Duration::days(1)));

        let policy = MemberPolicy::requiring(MembershipTier::Deluxe);
        let chain = MemberGate::standing_rules(&m, &policy, now);
        assert_eq!(
            chain.evaluate(),
            Err(GateError::InsufficientMembership {
                required: MembershipTier::Deluxe,
                actual: MembershipTier::Basic,
            })
        );
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Member-scoped mutations: account activation, privacy-policy acceptance and
//! membership upgrades.

use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::application::member_gate::{MemberCommand, MemberPolicy};
use crate::application::request::LocalizedRequest;
use crate::domain::errors::GateError;
use crate::domain::locale::LocaleId;
use crate::domain::member::{HouseholdMember, MembershipTier};
use crate::domain::rule_chain::RuleChain;

/// Longest membership period that can be bought at once.
pub const MAX_MEMBERSHIP_DAYS: u32 = 730;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivateAccountRequest {
    pub locale_id: Option<LocaleId>,
}

impl LocalizedRequest for ActivateAccountRequest {
    fn locale_id(&self) -> Option<LocaleId> {
        self.locale_id
    }
}

/// Marks the caller's account as activated.
#[derive(Debug, Default)]
pub struct ActivateAccount;

impl MemberCommand for ActivateAccount {
    type Request = ActivateAccountRequest;

    fn name(&self) -> &'static str {
        "activate_account"
    }

    fn policy(&self) -> MemberPolicy {
        MemberPolicy::unrestricted()
    }

    fn modify_data(
        &self,
        mut member: HouseholdMember,
        _request: &Self::Request,
    ) -> Result<HouseholdMember, GateError> {
        member.activate(Utc::now());
        Ok(member)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcceptPrivacyPolicyRequest {
    pub locale_id: Option<LocaleId>,
}

impl LocalizedRequest for AcceptPrivacyPolicyRequest {
    fn locale_id(&self) -> Option<LocaleId> {
        self.locale_id
    }
}

/// Records that the caller accepted the current privacy policy.
#[derive(Debug, Default)]
pub struct AcceptPrivacyPolicy;

impl MemberCommand for AcceptPrivacyPolicy {
    type Request = AcceptPrivacyPolicyRequest;

    fn name(&self) -> &'static str {
        "accept_privacy_policy"
    }

    fn policy(&self) -> MemberPolicy {
        MemberPolicy::unrestricted()
    }

    fn modify_data(
        &self,
        mut member: HouseholdMember,
        _request: &Self::Request,
    ) -> Result<HouseholdMember, GateError> {
        member.accept_privacy_policy(Utc::now());
        Ok(member)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeMembershipRequest {
    pub tier: MembershipTier,
    pub duration_days: u32,
    #[serde(default)]
    pub locale_id: Option<LocaleId>,
}

impl LocalizedRequest for UpgradeMembershipRequest {
    fn locale_id(&self) -> Option<LocaleId> {
        self.locale_id
    }
}

/// Moves the caller to a higher membership tier for a number of days.
#[derive(Debug, Default)]
pub struct UpgradeMembership;

impl MemberCommand for UpgradeMembership {
    type Request = UpgradeMembershipRequest;

    fn name(&self) -> &'static str {
        "upgrade_membership"
    }

    fn add_validation_rules<'a>(
        &self,
        member: &'a HouseholdMember,
        request: &'a Self::Request,
        chain: &mut RuleChain<'a>,
    ) {
        let current = member.effective_tier(Utc::now());
        chain
            .is_satisfied_by(
                move || request.tier > current,
                GateError::validation(
                    "tier",
                    format!("must be higher than the current '{}' membership", current),
                ),
            )
            .is_satisfied_by(
                move || (1..=MAX_MEMBERSHIP_DAYS).contains(&request.duration_days),
                GateError::validation(
                    "duration_days",
                    format!("must be between 1 and {}", MAX_MEMBERSHIP_DAYS),
                ),
            );
    }

    fn modify_data(
        &self,
        mut member: HouseholdMember,
        request: &Self::Request,
    ) -> Result<HouseholdMember, GateError> {
        let expires_at = Utc::now() + Duration::days(i64::from(request.duration_days));
        member.upgrade(request.tier, Some(expires_at));
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mail::MailAddress;

    fn member() -> HouseholdMember {
        HouseholdMember::register(MailAddress::parse("alice@example.com").unwrap(), Utc::now())
    }

    #[test]
    fn test_activation_commands_are_unrestricted() {
        assert_eq!(ActivateAccount.policy(), MemberPolicy::unrestricted());
        assert_eq!(AcceptPrivacyPolicy.policy(), MemberPolicy::unrestricted());
        assert_eq!(UpgradeMembership.policy(), MemberPolicy::default());
    }

    #[test]
    fn test_upgrade_rules() {
        let m = member();
        let same_tier = UpgradeMembershipRequest {
            tier: MembershipTier::Basic,
            duration_days: 30,
            locale_id: None,
        };
        let mut chain = RuleChain::new();
        UpgradeMembership.add_validation_rules(&m, &same_tier, &mut chain);
        assert!(matches!(
            chain.evaluate(),
            Err(GateError::ValidationFailed { field, .. }) if field == "tier"
        ));

        let too_long = UpgradeMembershipRequest {
            tier: MembershipTier::Deluxe,
            duration_days: MAX_MEMBERSHIP_DAYS + 1,
            locale_id: None,
        };
        let mut chain = RuleChain::new();
        UpgradeMembership.add_validation_rules(&m, &too_long, &mut chain);
        assert!(matches!(
            chain.evaluate(),
            Err(GateError::ValidationFailed { field, .. }) if field == "duration_days"
        ));
    }

    #[test]
    fn test_upgrade_sets_expiry() {
        let request = UpgradeMembershipRequest {
            tier: MembershipTier::Deluxe,
            duration_days: 30,
            locale_id: None,
        };
        let upgraded = UpgradeMembership.modify_data(member(), &request).unwrap();
        assert_eq!(upgraded.membership, MembershipTier::Deluxe);
        let expires_at = upgraded.membership_expires_at.unwrap();
        assert!(expires_at > Utc::now() + Duration::days(29));
    }
}

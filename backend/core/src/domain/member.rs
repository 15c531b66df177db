// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Household Member Aggregate
//!
//! A [`HouseholdMember`] is the actor every member-scoped operation runs as.
//! Its standing is made of three independent pieces of state that the
//! [`crate::application::member_gate::MemberGate`] inspects before any operation
//! body runs:
//!
//! | State | Field | Mutated by |
//! |-------|-------|------------|
//! | Activation | `activated_at` | [`HouseholdMember::activate`] |
//! | Privacy policy | `privacy_policy_accepted_at` | [`HouseholdMember::accept_privacy_policy`] |
//! | Membership | `membership` + `membership_expires_at` | [`HouseholdMember::upgrade`] |
//!
//! Members are never deleted by this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::mail::MailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Membership tiers, ordered from least to most privileged.
///
/// Variant order is significant: the derived `Ord` is what the gate uses for
/// the "tier is at least" comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    Basic,
    Deluxe,
    Premium,
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MembershipTier::Basic => "basic",
            MembershipTier::Deluxe => "deluxe",
            MembershipTier::Premium => "premium",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(MembershipTier::Basic),
            "deluxe" => Ok(MembershipTier::Deluxe),
            "premium" => Ok(MembershipTier::Premium),
            other => Err(format!("unknown membership tier '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: MemberId,
    pub mail_address: MailAddress,
    pub registered_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    pub privacy_policy_accepted_at: Option<DateTime<Utc>>,
    pub membership: MembershipTier,
    /// `None` for Basic, which never expires.
    pub membership_expires_at: Option<DateTime<Utc>>,
}

impl HouseholdMember {
    /// Registers a new member: not activated, policy not accepted, Basic tier.
    pub fn register(mail_address: MailAddress, now: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::new(),
            mail_address,
            registered_at: now,
            activated_at: None,
            privacy_policy_accepted_at: None,
            membership: MembershipTier::Basic,
            membership_expires_at: None,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn has_accepted_privacy_policy(&self) -> bool {
        self.privacy_policy_accepted_at.is_some()
    }

    /// Activating an already active account keeps the original timestamp.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        if self.activated_at.is_none() {
            self.activated_at = Some(now);
        }
    }

    /// Accepting again refreshes the timestamp to the latest acceptance.
    pub fn accept_privacy_policy(&mut self, now: DateTime<Utc>) {
        self.privacy_policy_accepted_at = Some(now);
    }

    pub fn upgrade(&mut self, tier: MembershipTier, expires_at: Option<DateTime<Utc>>) {
        self.membership = tier;
        self.membership_expires_at = match tier {
            MembershipTier::Basic => None,
            _ => expires_at,
        };
    }

    /// Tier in force at `now`. A lapsed paid membership counts as Basic.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> MembershipTier {
        match self.membership_expires_at {
            Some(expires_at) if expires_at <= now => MembershipTier::Basic,
            _ => self.membership,
        }
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
    fn test_tier_ordering() {
        assert!(MembershipTier::Basic < MembershipTier::Deluxe);
        assert!(MembershipTier::Deluxe < MembershipTier::Premium);
        assert_eq!(MembershipTier::default(), MembershipTier::Basic);
        assert_eq!("Premium".parse::<MembershipTier>(), Ok(MembershipTier::Premium));
        assert!("gold".parse::<MembershipTier>().is_err());
    }

    #[test]
    fn test_registration_defaults() {
        let m = member();
        assert!(!m.is_activated());
        assert!(!m.has_accepted_privacy_policy());
        assert_eq!(m.membership, MembershipTier::Basic);
    }

    #[test]
    fn test_activate_is_sticky() {
        let mut m = member();
        let first = Utc::now() - Duration::days(2);
        m.activate(first);
        m.activate(Utc::now());
        assert_eq!(m.activated_at, Some(first));
    }

    #[test]
    fn test_effective_tier_lapses_to_basic() {
        let mut m = member();
        let now = Utc::now();
        m.upgrade(MembershipTier::Premium, Some(now + Duration::days(30)));
        assert_eq!(m.effective_tier(now), MembershipTier::Premium);
        assert_eq!(m.effective_tier(now + Duration::days(31)), MembershipTier::Basic);

        m.upgrade(MembershipTier::Basic, Some(now + Duration::days(30)));
        assert_eq!(m.membership_expires_at, None);
    }
}

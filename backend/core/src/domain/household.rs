// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Household Aggregate
//!
//! A [`Household`] owns a roster of member mail addresses. The roster never
//! holds the same address twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::mail::MailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HouseholdId(pub Uuid);

impl HouseholdId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HouseholdId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HouseholdError {
    #[error("{0} is already a member of the household")]
    AlreadyMember(MailAddress),
    #[error("{0} is not a member of the household")]
    NotAMember(MailAddress),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub id: HouseholdId,
    pub name: String,
    pub members: Vec<MailAddress>,
    pub updated_at: DateTime<Utc>,
}

impl Household {
    pub fn new(name: impl Into<String>, founder: MailAddress, now: DateTime<Utc>) -> Self {
        Self {
            id: HouseholdId::new(),
            name: name.into(),
            members: vec![founder],
            updated_at: now,
        }
    }

    pub fn contains(&self, mail_address: &MailAddress) -> bool {
        self.members.iter().any(|m| m == mail_address)
    }

    pub fn add_member(
        &mut self,
        mail_address: MailAddress,
        now: DateTime<Utc>,
    ) -> Result<(), HouseholdError> {
        if self.contains(&mail_address) {
            return Err(HouseholdError::AlreadyMember(mail_address));
        }
        self.members.push(mail_address);
        self.updated_at = now;
        Ok(())
    }

    pub fn remove_member(
        &mut self,
        mail_address: &MailAddress,
        now: DateTime<Utc>,
    ) -> Result<(), HouseholdError> {
        let before = self.members.len();
        self.members.retain(|m| m != mail_address);
        if self.members.len() == before {
            return Err(HouseholdError::NotAMember(mail_address.clone()));
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.name = name.into();
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(s: &str) -> MailAddress {
        MailAddress::parse(s).unwrap()
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let mut household = Household::new("H1", mail("bob@example.com"), Utc::now());
        household.add_member(mail("carol@example.com"), Utc::now()).unwrap();
        assert_eq!(
            household.add_member(mail("CAROL@example.com"), Utc::now()),
            Err(HouseholdError::AlreadyMember(mail("carol@example.com")))
        );
        assert_eq!(household.members.len(), 2);
    }

    #[test]
    fn test_remove_absent_member_fails() {
        let mut household = Household::new("H1", mail("bob@example.com"), Utc::now());
        assert!(matches!(
            household.remove_member(&mail("dave@example.com"), Utc::now()),
            Err(HouseholdError::NotAMember(_))
        ));
        household.remove_member(&mail("bob@example.com"), Utc::now()).unwrap();
        assert!(household.members.is_empty());
    }
}

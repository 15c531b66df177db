// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-Memory Store
//!
//! Thread-safe, HashMap-backed implementation of every collaborator contract in
//! [`crate::domain::repository`]. Used by the CLI (seeded from the
//! `BackendConfig`) and by tests.
//!
//! `update` never inserts: persisting an entity that was not registered first is
//! a collaborator failure (`RepositoryError::NotFound`).

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::config::SeedData;
use crate::domain::food::{FoodGroup, WasteEntry};
use crate::domain::household::{Household, HouseholdId};
use crate::domain::locale::{LocaleId, LocaleInfo};
use crate::domain::mail::MailAddress;
use crate::domain::member::{HouseholdMember, MembershipTier};
use crate::domain::repository::{
    FoodGroupRepository, HouseholdRepository, IdentityResolver, LocaleResolver, MemberRepository,
    RepositoryError,
};

#[derive(Default)]
pub struct InMemoryStore {
    members: RwLock<HashMap<MailAddress, HouseholdMember>>,
    households: RwLock<HashMap<HouseholdId, Household>>,
    locales: RwLock<HashMap<LocaleId, LocaleInfo>>,
    food_groups: RwLock<Vec<FoodGroup>>,
    waste: RwLock<Vec<WasteEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from configuration seed data.
    pub fn from_seed(seed: &SeedData, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let store = Self::new();

        for culture in &seed.locales {
            store.insert_locale(LocaleInfo::new(culture.clone()));
        }

        for entry in &seed.members {
            let mut member = HouseholdMember::register(entry.mail_address.clone(), now);
            if entry.activated {
                member.activate(now);
            }
            if entry.privacy_policy_accepted {
                member.accept_privacy_policy(now);
            }
            if entry.membership != MembershipTier::Basic {
                let expires_at = entry
                    .membership_days
                    .map(|days| now + Duration::days(i64::from(days)));
                member.upgrade(entry.membership, expires_at);
            }
            store.insert_member(member);
        }

        for entry in &seed.households {
            let mut members = entry.members.iter();
            let founder = members
                .next()
                .with_context(|| format!("Household '{}' has no members", entry.name))?;
            let mut household = Household::new(entry.name.clone(), founder.clone(), now);
            if let Some(id) = &entry.id {
                household.id = HouseholdId::from_string(id)
                    .with_context(|| format!("Invalid id for household '{}'", entry.name))?;
            }
            for mail in members {
                household
                    .add_member(mail.clone(), now)
                    .with_context(|| format!("Invalid roster for household '{}'", entry.name))?;
            }
            store.insert_household(household);
        }

        for entry in &seed.food_groups {
            let group = entry
                .translations
                .iter()
                .fold(FoodGroup::new(entry.name.clone()), |group, (culture, name)| {
                    group.with_translation(culture.clone(), name.clone())
                });
            store.insert_food_group(group);
        }

        for entry in &seed.waste {
            let household = store
                .find_household_by_name(&entry.household)
                .with_context(|| format!("Unknown household '{}'", entry.household))?;
            let food_group = store
                .find_food_group_by_name(&entry.food_group)
                .with_context(|| format!("Unknown food group '{}'", entry.food_group))?;
            store.record_waste(WasteEntry {
                household_id: household.id,
                food_group_id: food_group.id,
                grams: entry.grams,
                recorded_at: now,
            });
        }

        tracing::debug!(
            members = store.members.read().len(),
            households = store.households.read().len(),
            locales = store.locales.read().len(),
            "Seeded in-memory store"
        );

        Ok(store)
    }

    pub fn insert_member(&self, member: HouseholdMember) {
        self.members.write().insert(member.mail_address.clone(), member);
    }

    pub fn insert_household(&self, household: Household) {
        self.households.write().insert(household.id, household);
    }

    pub fn insert_locale(&self, locale: LocaleInfo) -> LocaleId {
        let id = locale.id;
        self.locales.write().insert(id, locale);
        id
    }

    pub fn insert_food_group(&self, group: FoodGroup) {
        self.food_groups.write().push(group);
    }

    pub fn record_waste(&self, entry: WasteEntry) {
        self.waste.write().push(entry);
    }

    pub fn member(&self, mail_address: &MailAddress) -> Option<HouseholdMember> {
        self.members.read().get(mail_address).cloned()
    }

    pub fn household(&self, id: HouseholdId) -> Option<Household> {
        self.households.read().get(&id).cloned()
    }

    pub fn locale_by_culture(&self, culture: &str) -> Option<LocaleInfo> {
        self.locales
            .read()
            .values()
            .find(|l| l.culture.eq_ignore_ascii_case(culture))
            .cloned()
    }

    pub fn find_household_by_name(&self, name: &str) -> Option<Household> {
        self.households.read().values().find(|h| h.name == name).cloned()
    }

    fn find_food_group_by_name(&self, name: &str) -> Option<FoodGroup> {
        self.food_groups.read().iter().find(|g| g.name == name).cloned()
    }
}

impl IdentityResolver for InMemoryStore {
    fn resolve_by_claim(
        &self,
        mail_address: &MailAddress,
    ) -> Result<Option<HouseholdMember>, RepositoryError> {
        Ok(self.member(mail_address))
    }

    fn resolve_household(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError> {
        Ok(self.household(id))
    }
}

impl LocaleResolver for InMemoryStore {
    fn resolve(&self, id: LocaleId) -> Result<Option<LocaleInfo>, RepositoryError> {
        Ok(self.locales.read().get(&id).cloned())
    }
}

impl MemberRepository for InMemoryStore {
    fn update(&self, member: HouseholdMember) -> Result<HouseholdMember, RepositoryError> {
        let mut members = self.members.write();
        match members.get_mut(&member.mail_address) {
            Some(stored) => {
                *stored = member.clone();
                Ok(member)
            }
            None => Err(RepositoryError::NotFound(format!("member {}", member.mail_address))),
        }
    }
}

impl HouseholdRepository for InMemoryStore {
    fn update(&self, household: Household) -> Result<Household, RepositoryError> {
        let mut households = self.households.write();
        match households.get_mut(&household.id) {
            Some(stored) => {
                *stored = household.clone();
                Ok(household)
            }
            None => Err(RepositoryError::NotFound(format!("household {}", household.id))),
        }
    }

    fn find_by_member(
        &self,
        mail_address: &MailAddress,
    ) -> Result<Vec<Household>, RepositoryError> {
        let mut found: Vec<Household> = self
            .households
            .read()
            .values()
            .filter(|h| h.contains(mail_address))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

impl FoodGroupRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<FoodGroup>, RepositoryError> {
        Ok(self.food_groups.read().clone())
    }

    fn waste_entries(&self, household_id: HouseholdId) -> Result<Vec<WasteEntry>, RepositoryError> {
        Ok(self
            .waste
            .read()
            .iter()
            .filter(|e| e.household_id == household_id)
            .cloned()
            .collect())
    }
}

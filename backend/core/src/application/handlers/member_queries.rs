// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Member-scoped reads.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::member_gate::{MemberPolicy, MemberQuery};
use crate::application::request::LocalizedRequest;
use crate::domain::errors::GateError;
use crate::domain::food::{FoodGroup, FoodGroupId, WasteLine, WasteReport};
use crate::domain::locale::{LocaleId, LocaleInfo};
use crate::domain::member::{HouseholdMember, MembershipTier};
use crate::domain::repository::{FoodGroupRepository, HouseholdRepository};

/// Request carrying nothing but an optional locale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedQuery {
    pub locale_id: Option<LocaleId>,
}

impl LocalizedQuery {
    pub fn in_locale(locale_id: LocaleId) -> Self {
        Self {
            locale_id: Some(locale_id),
        }
    }
}

impl LocalizedRequest for LocalizedQuery {
    fn locale_id(&self) -> Option<LocaleId> {
        self.locale_id
    }
}

/// The caller's own member record.
#[derive(Debug, Default)]
pub struct GetMemberProfile;

impl MemberQuery for GetMemberProfile {
    type Request = LocalizedQuery;
    type Output = HouseholdMember;

    fn name(&self) -> &'static str {
        "get_member_profile"
    }

    fn get_data(
        &self,
        member: &HouseholdMember,
        _request: &Self::Request,
        _locale: Option<&LocaleInfo>,
    ) -> Result<HouseholdMember, GateError> {
        Ok(member.clone())
    }
}

/// Food-group reference data, rendered in the caller's locale.
pub struct ListFoodGroups {
    food_groups: Arc<dyn FoodGroupRepository>,
}

impl ListFoodGroups {
    pub fn new(food_groups: Arc<dyn FoodGroupRepository>) -> Self {
        Self { food_groups }
    }
}

impl MemberQuery for ListFoodGroups {
    type Request = LocalizedQuery;
    type Output = Vec<FoodGroup>;

    fn name(&self) -> &'static str {
        "list_food_groups"
    }

    fn get_data(
        &self,
        _member: &HouseholdMember,
        _request: &Self::Request,
        locale: Option<&LocaleInfo>,
    ) -> Result<Vec<FoodGroup>, GateError> {
        let mut groups = self.food_groups.list()?;
        groups.sort_by(|a, b| a.display_name(locale).cmp(b.display_name(locale)));
        Ok(groups)
    }
}

/// Food-waste statistics. A Deluxe feature.
pub struct GetWasteReport {
    households: Arc<dyn HouseholdRepository>,
    food_groups: Arc<dyn FoodGroupRepository>,
}

impl GetWasteReport {
    pub fn new(
        households: Arc<dyn HouseholdRepository>,
        food_groups: Arc<dyn FoodGroupRepository>,
    ) -> Self {
        Self {
            households,
            food_groups,
        }
    }
}

impl MemberQuery for GetWasteReport {
    type Request = LocalizedQuery;
    type Output = WasteReport;

    fn name(&self) -> &'static str {
        "get_waste_report"
    }

    fn policy(&self) -> MemberPolicy {
        MemberPolicy::requiring(MembershipTier::Deluxe)
    }

    fn get_data(
        &self,
        member: &HouseholdMember,
        _request: &Self::Request,
        _locale: Option<&LocaleInfo>,
    ) -> Result<WasteReport, GateError> {
        let households = self.households.find_by_member(&member.mail_address)?;

        let mut grams_by_group: BTreeMap<FoodGroupId, u64> = BTreeMap::new();
        let mut last_recorded_at = None;
        for household in &households {
            for entry in self.food_groups.waste_entries(household.id)? {
                *grams_by_group.entry(entry.food_group_id).or_default() += u64::from(entry.grams);
                last_recorded_at = last_recorded_at.max(Some(entry.recorded_at));
            }
        }

        // Entries referring to unknown groups are dropped from the lines.
        let lines: Vec<WasteLine> = self
            .food_groups
            .list()?
            .into_iter()
            .filter_map(|group| {
                grams_by_group.get(&group.id).map(|grams| WasteLine {
                    grams: *grams,
                    food_group: group,
                })
            })
            .collect();
        let total_grams = lines.iter().map(|line| line.grams).sum();

        Ok(WasteReport {
            households: households.len(),
            lines,
            total_grams,
            last_recorded_at,
        })
    }
}

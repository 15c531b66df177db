// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Food-waste tracker reference data: food groups and recorded waste.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::household::HouseholdId;
use super::locale::LocaleInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodGroupId(pub Uuid);

impl FoodGroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FoodGroupId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodGroup {
    pub id: FoodGroupId,
    /// Untranslated fallback name.
    pub name: String,
    /// Culture tag (or bare language) -> translated name.
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl FoodGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FoodGroupId::new(),
            name: name.into(),
            translations: HashMap::new(),
        }
    }

    pub fn with_translation(mut self, culture: impl Into<String>, name: impl Into<String>) -> Self {
        self.translations.insert(culture.into(), name.into());
        self
    }

    /// Exact culture first, then the bare language, then the fallback name.
    pub fn display_name(&self, locale: Option<&LocaleInfo>) -> &str {
        let Some(locale) = locale else {
            return &self.name;
        };
        self.translations
            .get(&locale.culture)
            .or_else(|| self.translations.get(locale.language()))
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

/// Amount of food thrown away by a household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEntry {
    pub household_id: HouseholdId,
    pub food_group_id: FoodGroupId,
    pub grams: u32,
    pub recorded_at: DateTime<Utc>,
}

/// Total waste per food group across a member's households.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteReport {
    pub households: usize,
    pub lines: Vec<WasteLine>,
    pub total_grams: u64,
    /// Most recent `recorded_at` among the counted entries.
    pub last_recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteLine {
    pub food_group: FoodGroup,
    pub grams: u64,
}

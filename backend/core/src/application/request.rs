// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Contracts shared by both gates: what a request must expose, how results are
//! rendered, and what a persisted mutation returns.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::household::{Household, HouseholdId};
use crate::domain::locale::{LocaleId, LocaleInfo};

/// Requests handled by the member gate.
///
/// When `locale_id` returns `Some`, the gate resolves it before anything else
/// and fails the request if it does not resolve.
pub trait LocalizedRequest {
    fn locale_id(&self) -> Option<LocaleId> {
        None
    }
}

/// Requests handled by the household gate.
pub trait HouseholdRequest {
    fn household_id(&self) -> HouseholdId;

    /// Mail address whose membership the request adds or removes, if any.
    /// Checked against the caller's claim before any handler rule.
    fn target_mail_address(&self) -> Option<&str> {
        None
    }
}

/// Maps an operation result into the caller-facing representation.
pub trait ResultRenderer<T> {
    type View;

    fn render(&self, data: T, locale: Option<&LocaleInfo>) -> Self::View;
}

/// Returned after a mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub entity_id: Uuid,
    pub persisted_at: DateTime<Utc>,
}

impl From<&Household> for Receipt {
    fn from(household: &Household) -> Self {
        Self {
            entity_id: household.id.0,
            persisted_at: household.updated_at,
        }
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Collaborator Contracts
//!
//! Persistence and lookup capabilities the gates depend on. Interfaces live in
//! the domain layer; implementations live in `crate::infrastructure`.
//!
//! | Trait | Used by | Purpose |
//! |-------|---------|---------|
//! | `IdentityResolver` | both gates | caller claim -> member, id -> household |
//! | `LocaleResolver` | member gate | locale id -> `LocaleInfo` |
//! | `MemberRepository` | member gate | persist mutated members |
//! | `HouseholdRepository` | household gate | persist mutated households |
//! | `FoodGroupRepository` | food-waste queries | reference data and waste entries |
//!
//! Lookups return `Ok(None)` for "not found". `Err` is reserved for failures of
//! the collaborator itself and is never reinterpreted as a business error.
//!
//! All calls are synchronous; implementations synchronise internally.

use crate::domain::food::{FoodGroup, WasteEntry};
use crate::domain::household::{Household, HouseholdId};
use crate::domain::locale::{LocaleId, LocaleInfo};
use crate::domain::mail::MailAddress;
use crate::domain::member::HouseholdMember;

pub trait IdentityResolver: Send + Sync {
    /// Resolve the acting member from the caller's mail-address claim.
    fn resolve_by_claim(
        &self,
        mail_address: &MailAddress,
    ) -> Result<Option<HouseholdMember>, RepositoryError>;

    fn resolve_household(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError>;
}

pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, id: LocaleId) -> Result<Option<LocaleInfo>, RepositoryError>;
}

pub trait MemberRepository: Send + Sync {
    /// Persist a mutated member and return the stored state.
    fn update(&self, member: HouseholdMember) -> Result<HouseholdMember, RepositoryError>;
}

pub trait HouseholdRepository: Send + Sync {
    /// Persist a mutated household and return the stored state.
    fn update(&self, household: Household) -> Result<Household, RepositoryError>;

    fn find_by_member(&self, mail_address: &MailAddress) -> Result<Vec<Household>, RepositoryError>;
}

pub trait FoodGroupRepository: Send + Sync {
    fn list(&self) -> Result<Vec<FoodGroup>, RepositoryError>;

    fn waste_entries(&self, household_id: HouseholdId) -> Result<Vec<WasteEntry>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! Domain types for the household backend. Only [`config`] touches the filesystem.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`mail`] | `MailAddress` |
//! | [`member`] | `HouseholdMember`, `MemberId`, `MembershipTier` |
//! | [`household`] | `Household`, `HouseholdId` |
//! | [`locale`] | `LocaleInfo`, `LocaleId` |
//! | [`food`] | `FoodGroup`, `WasteEntry` |
//! | [`rule_chain`] | `Rule`, `RuleChain` |
//! | [`errors`] | `GateError`, `EntityKind` |
//! | [`repository`] | collaborator traits, `RepositoryError` |
//! | [`events`] | `GateEvent` |
//! | [`config`] | `BackendConfig` |

pub mod config;
pub mod errors;
pub mod events;
pub mod food;
pub mod household;
pub mod locale;
pub mod mail;
pub mod member;
pub mod repository;
pub mod rule_chain;

pub use errors::{EntityKind, GateError};
pub use household::{Household, HouseholdId};
pub use locale::{LocaleId, LocaleInfo};
pub use mail::MailAddress;
pub use member::{HouseholdMember, MemberId, MembershipTier};
pub use rule_chain::{Rule, RuleChain};

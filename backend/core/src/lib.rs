// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Homeledger Core
//!
//! Policy-gated request pipeline for the household backend. Every operation
//! runs through one of two gates:
//!
//! - [`application::MemberGate`] - operations performed by and on the calling
//!   member (locale, identity, activation, privacy policy, membership tier)
//! - [`application::HouseholdGate`] - mutations of a household the caller
//!   addresses by id (rules, self-modification guard, persist, receipt)
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, gates and in-memory adapters

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;

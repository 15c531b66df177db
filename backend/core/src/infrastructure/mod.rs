// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Infrastructure Layer
//!
//! Adapters behind the domain contracts:
//! - [`repositories`] - `InMemoryStore`, all collaborator traits over shared maps
//! - [`renderer`] - `ViewRenderer`, locale-aware result views
//! - [`event_bus`] - tokio broadcast channel for gate outcome events

pub mod event_bus;
pub mod renderer;
pub mod repositories;

pub use event_bus::EventBus;
pub use renderer::ViewRenderer;
pub use repositories::InMemoryStore;

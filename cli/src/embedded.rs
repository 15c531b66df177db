// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Embedded backend
//!
//! Builds the store, event bus and service in-process from a validated
//! `BackendConfig`. Every CLI invocation gets a fresh backend seeded from
//! configuration.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

use homeledger_core::{
    application::{Collaborators, HouseholdService},
    domain::{config::BackendConfig, events::GateEvent, LocaleId, MailAddress},
    infrastructure::{
        event_bus::{EventBus, EventBusError, EventReceiver},
        InMemoryStore,
    },
};

pub struct EmbeddedBackend {
    service: HouseholdService,
    store: Arc<InMemoryStore>,
    events: Option<EventReceiver>,
    default_culture: Option<String>,
}

impl EmbeddedBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        config
            .validate()
            .context("Configuration validation failed")?;

        let store = Arc::new(
            InMemoryStore::from_seed(&config.spec.seed, Utc::now())
                .context("Failed to seed in-memory store")?,
        );

        let (event_bus, events) = if config.spec.events.enabled {
            let bus = EventBus::new(config.spec.events.capacity);
            let receiver = bus.subscribe();
            (Some(bus), Some(receiver))
        } else {
            (None, None)
        };

        let service = HouseholdService::new(Collaborators::from_store(store.clone()), event_bus);

        Ok(Self {
            service,
            store,
            events,
            default_culture: config.spec.default_culture.clone(),
        })
    }

    pub fn service(&self) -> &HouseholdService {
        &self.service
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Locale for `--culture`, or the configured default when none was given.
    pub fn locale_for(&self, culture: Option<&str>) -> Result<Option<LocaleId>> {
        let Some(culture) = culture.or(self.default_culture.as_deref()) else {
            return Ok(None);
        };
        let locale = self
            .store
            .locale_by_culture(culture)
            .with_context(|| format!("Unknown culture '{}'", culture))?;
        Ok(Some(locale.id))
    }

    /// Gate events published since the last call.
    pub fn drain_events(&mut self) -> Vec<GateEvent> {
        let Some(receiver) = self.events.as_mut() else {
            return Vec::new();
        };
        let mut drained = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(event) => drained.push(event),
                // Overwritten events are gone; the rest of the buffer is still readable.
                Err(EventBusError::Lagged(_)) => continue,
                Err(EventBusError::Empty) | Err(EventBusError::Closed) => break,
            }
        }
        drained
    }
}

/// Parse the `--caller` claim.
pub fn caller_claim(caller: Option<&str>) -> Result<MailAddress> {
    let raw = caller.context("No caller given. Pass --caller <MAIL> or set HOMELEDGER_CALLER")?;
    MailAddress::parse(raw).with_context(|| format!("Invalid caller '{}'", raw))
}

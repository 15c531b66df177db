// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Pub/Sub for Gate Events
//
// In-memory event streaming over tokio broadcast channels. Gates publish one
// event per request; audit sinks and the CLI subscribe.
//
// Events are not persisted and are lost on restart.

use crate::domain::events::GateEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Event bus for publishing and subscribing to gate events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<GateEvent>>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    /// Capacity determines how many events can be buffered before dropping old ones
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    /// Publish a gate event to all subscribers. Never blocks.
    pub fn publish(&self, event: GateEvent) {
        debug!("Publishing event: {:?}", event);

        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            debug!("No subscribers listening to event");
        }
    }

    /// Subscribe to all gate events
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to rejected requests only
    pub fn subscribe_rejections(&self) -> RejectionReceiver {
        RejectionReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn map_recv_error(e: broadcast::error::RecvError) -> EventBusError {
    match e {
        broadcast::error::RecvError::Closed => EventBusError::Closed,
        broadcast::error::RecvError::Lagged(n) => {
            warn!("Event receiver lagged by {} events", n);
            EventBusError::Lagged(n)
        }
    }
}

/// Receiver for all gate events
pub struct EventReceiver {
    receiver: broadcast::Receiver<GateEvent>,
}

impl EventReceiver {
    /// Receive the next event (waits until one is available)
    pub async fn recv(&mut self) -> Result<GateEvent, EventBusError> {
        self.receiver.recv().await.map_err(map_recv_error)
    }

    /// Try to receive an event without waiting
    pub fn try_recv(&mut self) -> Result<GateEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Receiver that skips completed requests
pub struct RejectionReceiver {
    receiver: broadcast::Receiver<GateEvent>,
}

impl RejectionReceiver {
    pub async fn recv(&mut self) -> Result<GateEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(map_recv_error)?;
            if matches!(event, GateEvent::RequestRejected { .. }) {
                return Ok(event);
            }
        }
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::GateKind;
    use chrono::Utc;

    fn completed(operation: &str) -> GateEvent {
        GateEvent::RequestCompleted {
            gate: GateKind::Member,
            operation: operation.to_string(),
            completed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        event_bus.publish(completed("get_member_profile"));

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.operation(), "get_member_profile");
    }

    #[tokio::test]
    async fn test_rejection_filtering() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe_rejections();

        event_bus.publish(completed("activate_account"));
        event_bus.publish(GateEvent::RequestRejected {
            gate: GateKind::Member,
            operation: "upgrade_membership".to_string(),
            error_kind: "actor_not_activated".to_string(),
            details: String::new(),
            rejected_at: Utc::now(),
        });

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.operation(), "upgrade_membership");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();

        assert_eq!(event_bus.subscriber_count(), 2);

        event_bus.publish(completed("list_food_groups"));

        let _ = receiver1.recv().await.unwrap();
        let _ = receiver2.recv().await.unwrap();
    }

    #[test]
    fn test_try_recv_empty() {
        let event_bus = EventBus::new(4);
        let mut receiver = event_bus.subscribe();
        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain events published by the gates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which gate handled the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    Member,
    Household,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateEvent {
    RequestRejected {
        gate: GateKind,
        operation: String,
        error_kind: String,
        details: String,
        rejected_at: DateTime<Utc>,
    },
    RequestCompleted {
        gate: GateKind,
        operation: String,
        completed_at: DateTime<Utc>,
    },
}

impl GateEvent {
    pub fn operation(&self) -> &str {
        match self {
            GateEvent::RequestRejected { operation, .. }
            | GateEvent::RequestCompleted { operation, .. } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_event_serialization() {
        let event = GateEvent::RequestRejected {
            gate: GateKind::Household,
            operation: "remove_household_member".to_string(),
            error_kind: "self_modification_rejected".to_string(),
            details: "bob@example.com".to_string(),
            rejected_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "request_rejected");
        assert_eq!(json["gate"], "household");

        let back: GateEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back.operation(), "remove_household_member");
    }
}

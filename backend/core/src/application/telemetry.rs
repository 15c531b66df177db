// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Outcome recording shared by the gates: one log line, counters, and an
// optional event per request.

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::errors::GateError;
use crate::domain::events::{GateEvent, GateKind};
use crate::infrastructure::event_bus::EventBus;

fn gate_label(gate: GateKind) -> &'static str {
    match gate {
        GateKind::Member => "member",
        GateKind::Household => "household",
    }
}

pub(crate) fn record_outcome<T>(
    event_bus: Option<&EventBus>,
    gate: GateKind,
    operation: &'static str,
    outcome: &Result<T, GateError>,
) {
    metrics::counter!(
        "homeledger_gate_requests_total",
        "gate" => gate_label(gate),
        "operation" => operation
    )
    .increment(1);

    let event = match outcome {
        Ok(_) => {
            info!(gate = gate_label(gate), operation, "Request completed");
            GateEvent::RequestCompleted {
                gate,
                operation: operation.to_string(),
                completed_at: Utc::now(),
            }
        }
        Err(error) => {
            warn!(
                gate = gate_label(gate),
                operation,
                error_kind = error.kind(),
                "Request rejected: {}",
                error
            );
            metrics::counter!(
                "homeledger_gate_rejections_total",
                "gate" => gate_label(gate),
                "error" => error.kind()
            )
            .increment(1);
            GateEvent::RequestRejected {
                gate,
                operation: operation.to_string(),
                error_kind: error.kind().to_string(),
                details: error.to_string(),
                rejected_at: Utc::now(),
            }
        }
    };

    if let Some(bus) = event_bus {
        bus.publish(event);
    }
}

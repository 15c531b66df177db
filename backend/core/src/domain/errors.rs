// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Gate Error Taxonomy
//!
//! Every request that passes through a gate ends in either a result or exactly
//! one [`GateError`]. Business variants are terminal for the request and are
//! never retried here. Collaborator failures are carried in
//! [`GateError::Collaborator`] unchanged so callers can tell an infrastructure
//! fault apart from a rule violation.
//!
//! Translation into transport faults happens outside this crate.

use std::fmt;
use thiserror::Error;

use super::member::MembershipTier;
use super::repository::RepositoryError;

/// Kind of entity an identifier failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Locale,
    Household,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Locale => "locale",
            EntityKind::Household => "household",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("Unknown {kind} identifier: {id}")]
    UnknownIdentifier { kind: EntityKind, id: String },

    #[error("The acting caller is not a registered household member")]
    ActorNotRegistered,

    #[error("The acting household member has not been activated")]
    ActorNotActivated,

    #[error("The acting household member has not accepted the privacy policy")]
    PrivacyPolicyNotAccepted,

    #[error("Membership '{actual}' is insufficient, '{required}' is required")]
    InsufficientMembership {
        required: MembershipTier,
        actual: MembershipTier,
    },

    #[error("Validation failed for '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("A household member cannot modify their own membership through the household")]
    SelfModificationRejected,

    #[error(transparent)]
    Collaborator(#[from] RepositoryError),
}

impl GateError {
    pub fn unknown(kind: EntityKind, id: impl ToString) -> Self {
        GateError::UnknownIdentifier {
            kind,
            id: id.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GateError::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case label for logs, metrics and events.
    pub fn kind(&self) -> &'static str {
        match self {
            GateError::UnknownIdentifier { .. } => "unknown_identifier",
            GateError::ActorNotRegistered => "actor_not_registered",
            GateError::ActorNotActivated => "actor_not_activated",
            GateError::PrivacyPolicyNotAccepted => "privacy_policy_not_accepted",
            GateError::InsufficientMembership { .. } => "insufficient_membership",
            GateError::ValidationFailed { .. } => "validation_failed",
            GateError::SelfModificationRejected => "self_modification_rejected",
            GateError::Collaborator(_) => "collaborator_failure",
        }
    }

    /// `false` only for collaborator failures.
    pub fn is_business_error(&self) -> bool {
        !matches!(self, GateError::Collaborator(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_kinds() {
        let err = GateError::unknown(EntityKind::Locale, "abc");
        assert_eq!(err.to_string(), "Unknown locale identifier: abc");
        assert_eq!(err.kind(), "unknown_identifier");

        let err = GateError::InsufficientMembership {
            required: MembershipTier::Deluxe,
            actual: MembershipTier::Basic,
        };
        assert_eq!(err.to_string(), "Membership 'basic' is insufficient, 'deluxe' is required");

        let err = GateError::validation("mail_address", "malformed");
        assert_eq!(err.to_string(), "Validation failed for 'mail_address': malformed");
    }

    #[test]
    fn test_collaborator_errors_pass_through() {
        let err: GateError = RepositoryError::Database("connection reset".to_string()).into();
        assert!(!err.is_business_error());
        assert_eq!(err.to_string(), "Database error: connection reset");
        assert!(GateError::ActorNotActivated.is_business_error());
    }
}

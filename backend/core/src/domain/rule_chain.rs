// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Rule Chain
//!
//! Business invariants are declared as ordered `(predicate, error)` pairs and
//! evaluated later as a unit. Declaration and evaluation are separate so a gate
//! can append its own rules, hand the chain to a handler to append more, and
//! then evaluate once.
//!
//! ## Evaluation
//!
//! ```text
//! rule 1 ── true ──▶ rule 2 ── true ──▶ ... ──▶ Ok(())
//!   │                  │
//!  false              false
//!   ▼                  ▼
//! Err(error 1)       Err(error 2)      (later rules are not evaluated)
//! ```
//!
//! Predicates must be pure tests over state captured at declaration time. Under
//! that constraint, evaluating the same chain again yields the same outcome.

use std::fmt;

use super::errors::GateError;

/// A predicate paired with the error raised when it does not hold.
pub struct Rule<'a, E = GateError> {
    predicate: Box<dyn Fn() -> bool + 'a>,
    error: E,
}

impl<'a, E> Rule<'a, E> {
    pub fn new(predicate: impl Fn() -> bool + 'a, error: E) -> Self {
        Self {
            predicate: Box::new(predicate),
            error,
        }
    }

    pub fn holds(&self) -> bool {
        (self.predicate)()
    }

    pub fn error(&self) -> &E {
        &self.error
    }
}

impl<E: fmt::Debug> fmt::Debug for Rule<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("error", &self.error).finish_non_exhaustive()
    }
}

/// Ordered, fail-fast collection of [`Rule`]s.
///
/// A chain is built for one request and dropped after evaluation. It is not
/// `Send`; predicates typically borrow request-local state.
pub struct RuleChain<'a, E = GateError> {
    rules: Vec<Rule<'a, E>>,
}

impl<'a, E> RuleChain<'a, E> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Returns the same chain for fluent composition.
    pub fn is_satisfied_by(&mut self, predicate: impl Fn() -> bool + 'a, error: E) -> &mut Self {
        self.rules.push(Rule::new(predicate, error));
        self
    }

    pub fn push(&mut self, rule: Rule<'a, E>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule (in insertion order) whose predicate does not hold.
    pub fn first_violation(&self) -> Option<&Rule<'a, E>> {
        self.rules.iter().find(|rule| !rule.holds())
    }
}

impl<E: Clone> RuleChain<'_, E> {
    /// Walk the rules in insertion order and fail with the first violated
    /// rule's error. Nothing after that rule is evaluated.
    pub fn evaluate(&self) -> Result<(), E> {
        match self.first_violation() {
            Some(rule) => Err(rule.error.clone()),
            None => Ok(()),
        }
    }
}

impl<E> Default for RuleChain<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for RuleChain<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain").field("rules", &self.rules).finish()
    }
}

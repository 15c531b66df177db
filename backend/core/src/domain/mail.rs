// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Mail Address Value Object
//!
//! Household members are identified by their mail address. The caller's identity
//! claim, household rosters and member lookups all compare [`MailAddress`] values,
//! so the address is normalised (trimmed, lowercased) once at construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

static MAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("mail address pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailAddressError {
    #[error("Mail address is empty")]
    Empty,
    #[error("Mail address is malformed: {0}")]
    Malformed(String),
}

/// Normalised, syntactically valid mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MailAddress(String);

impl MailAddress {
    pub fn parse(raw: &str) -> Result<Self, MailAddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MailAddressError::Empty);
        }
        if !Self::is_well_formed(trimmed) {
            return Err(MailAddressError::Malformed(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Syntactic check only; no normalisation is applied.
    pub fn is_well_formed(raw: &str) -> bool {
        MAIL_PATTERN.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MailAddress {
    type Error = MailAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MailAddress> for String {
    fn from(value: MailAddress) -> Self {
        value.0
    }
}

impl std::str::FromStr for MailAddress {
    type Err = MailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_case_and_whitespace() {
        let mail = MailAddress::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(mail.as_str(), "alice@example.com");
        assert_eq!(mail, MailAddress::parse("alice@example.com").unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(MailAddress::parse(""), Err(MailAddressError::Empty));
        assert!(matches!(MailAddress::parse("bob"), Err(MailAddressError::Malformed(_))));
        assert!(matches!(MailAddress::parse("bob@"), Err(MailAddressError::Malformed(_))));
        assert!(matches!(MailAddress::parse("bob@host"), Err(MailAddressError::Malformed(_))));
        assert!(matches!(
            MailAddress::parse("b ob@example.com"),
            Err(MailAddressError::Malformed(_))
        ));
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let parsed: MailAddress = serde_json::from_str("\"Carol@Example.org\"").unwrap();
        assert_eq!(parsed.as_str(), "carol@example.org");
        assert!(serde_json::from_str::<MailAddress>("\"not-a-mail\"").is_err());
    }
}

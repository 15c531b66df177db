// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Translation/locale records used to render results for the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleId(pub Uuid);

impl LocaleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for LocaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A resolved locale. Resolved once per request and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    pub id: LocaleId,
    /// BCP-47 style culture tag, e.g. `de-DE`.
    pub culture: String,
}

impl LocaleInfo {
    pub fn new(culture: impl Into<String>) -> Self {
        Self {
            id: LocaleId::new(),
            culture: culture.into(),
        }
    }

    pub fn language(&self) -> &str {
        self.culture.split(['-', '_']).next().unwrap_or(&self.culture)
    }

    /// `chrono` format string for calendar dates in this culture.
    pub fn date_pattern(&self) -> &'static str {
        match (self.language(), self.culture.as_str()) {
            ("de", _) => "%d.%m.%Y",
            (_, "en-US") | (_, "en_US") => "%m/%d/%Y",
            ("en", _) => "%d/%m/%Y",
            _ => "%Y-%m-%d",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_patterns() {
        assert_eq!(LocaleInfo::new("de-AT").date_pattern(), "%d.%m.%Y");
        assert_eq!(LocaleInfo::new("en-US").date_pattern(), "%m/%d/%Y");
        assert_eq!(LocaleInfo::new("en-GB").date_pattern(), "%d/%m/%Y");
        assert_eq!(LocaleInfo::new("sv").date_pattern(), "%Y-%m-%d");
    }
}

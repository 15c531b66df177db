// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Backend Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) describing:
// - the default culture used when a caller names none
// - gate event publishing
// - logging
// - seed data for the in-memory store

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::mail::MailAddress;
use super::member::MembershipTier;

pub const API_VERSION: &str = "homeledger/v1";
pub const KIND: &str = "BackendConfig";
pub const CONFIG_PATH_ENV: &str = "HOMELEDGER_CONFIG_PATH";

/// Top-level configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API version (must be "homeledger/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "BackendConfig")
    pub kind: String,

    pub metadata: ConfigMetadata,

    pub spec: BackendSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSpec {
    /// Culture used by the CLI when no `--culture` is passed. `None` renders
    /// without locale-specific formatting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_culture: Option<String>,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub seed: SeedData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Broadcast buffer size
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Initial contents of the in-memory store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub locales: Vec<String>,

    #[serde(default)]
    pub members: Vec<SeedMember>,

    #[serde(default)]
    pub households: Vec<SeedHousehold>,

    #[serde(default)]
    pub food_groups: Vec<SeedFoodGroup>,

    #[serde(default)]
    pub waste: Vec<SeedWaste>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMember {
    pub mail_address: MailAddress,

    #[serde(default)]
    pub activated: bool,

    #[serde(default)]
    pub privacy_policy_accepted: bool,

    #[serde(default)]
    pub membership: MembershipTier,

    /// Days until a paid membership lapses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedHousehold {
    /// Fixed UUID; generated when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub members: Vec<MailAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFoodGroup {
    pub name: String,

    #[serde(default)]
    pub translations: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedWaste {
    /// Household name
    pub household: String,

    /// Food group (untranslated) name
    pub food_group: String,

    pub grams: u32,
}

fn default_true() -> bool {
    true
}

fn default_event_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_event_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ConfigMetadata {
                name: "homeledger".to_string(),
                version: None,
            },
            spec: BackendSpec {
                default_culture: None,
                events: EventsConfig::default(),
                logging: LoggingConfig::default(),
                seed: SeedData::default(),
            },
        }
    }
}

impl BackendConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. HOMELEDGER_CONFIG_PATH environment variable
    /// 2. ./homeledger-config.yaml (working directory)
    /// 3. ~/.homeledger/config.yaml (user home)
    /// 4. /etc/homeledger/config.yaml (system, Unix) or C:\ProgramData\Homeledger\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./homeledger-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".homeledger").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/homeledger/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Homeledger\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path fails if missing or invalid
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            Self::from_yaml_file(config_path)?
        } else {
            tracing::warn!(
                "No configuration file found in standard locations. Using empty defaults."
            );
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(culture) = std::env::var("HOMELEDGER_DEFAULT_CULTURE") {
            tracing::info!("Environment override: HOMELEDGER_DEFAULT_CULTURE={}", culture);
            self.spec.default_culture = if culture.trim().is_empty() {
                None
            } else {
                Some(culture)
            };
        }

        if let Ok(val) = std::env::var("HOMELEDGER_EVENT_CAPACITY") {
            match val.parse::<usize>() {
                Ok(capacity) if capacity > 0 => {
                    tracing::info!("Environment override: HOMELEDGER_EVENT_CAPACITY={}", capacity);
                    self.spec.events.capacity = capacity;
                }
                _ => {
                    tracing::warn!(
                        "Invalid value for HOMELEDGER_EVENT_CAPACITY: '{}'. Expected a positive integer. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!("Invalid apiVersion: '{}'. Must be '{}'", self.api_version, API_VERSION);
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.events.capacity == 0 {
            anyhow::bail!("spec.events.capacity must be greater than zero");
        }

        if !matches!(self.spec.logging.format.as_str(), "compact" | "json") {
            anyhow::bail!(
                "Invalid logging format: '{}'. Must be 'compact' or 'json'",
                self.spec.logging.format
            );
        }

        let seed = &self.spec.seed;

        if let Some(culture) = &self.spec.default_culture {
            if !seed.locales.iter().any(|l| l == culture) {
                anyhow::bail!("Default culture '{}' not found in seed.locales", culture);
            }
        }

        for (i, member) in seed.members.iter().enumerate() {
            if seed.members[..i].iter().any(|m| m.mail_address == member.mail_address) {
                anyhow::bail!("Duplicate seed member: {}", member.mail_address);
            }
            if member.membership != MembershipTier::Basic && member.membership_days == Some(0) {
                anyhow::bail!("membership_days must be positive for {}", member.mail_address);
            }
        }

        for household in &seed.households {
            if household.name.trim().is_empty() {
                anyhow::bail!("Seed household name cannot be empty");
            }
            if let Some(id) = &household.id {
                uuid::Uuid::parse_str(id).map_err(|e| {
                    anyhow::anyhow!("Invalid id for household '{}': {}", household.name, e)
                })?;
            }
            for (i, mail) in household.members.iter().enumerate() {
                if household.members[..i].contains(mail) {
                    anyhow::bail!("Household '{}' lists {} twice", household.name, mail);
                }
            }
        }

        for entry in &seed.waste {
            if !seed.households.iter().any(|h| h.name == entry.household) {
                anyhow::bail!("Waste entry references unknown household '{}'", entry.household);
            }
            if !seed.food_groups.iter().any(|g| g.name == entry.food_group) {
                anyhow::bail!("Waste entry references unknown food group '{}'", entry.food_group);
            }
        }

        Ok(())
    }
}

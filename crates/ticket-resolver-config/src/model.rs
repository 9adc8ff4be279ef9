//! Configuration schema for the ticket resolver.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root config for the ticket resolver.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResolverConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

impl ResolverConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::new()
    }

    /// Config with every artificial delay disabled, used by tests and scripts.
    pub fn without_delays() -> Self {
        Self::builder()
            .analysis(AnalysisConfig { delay_ms: 0 })
            .auth(AuthConfig {
                delay_ms: 0,
                ..AuthConfig::default()
            })
            .settings(SettingsConfig {
                connection_test_delay_ms: 0,
            })
            .build()
    }
}

/// Builder for assembling a `ResolverConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
        }
    }

    /// Replace the storage configuration.
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    /// Replace the analysis configuration.
    pub fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.config.analysis = analysis;
        self
    }

    /// Replace the authentication configuration.
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    /// Replace the settings dialog configuration.
    pub fn settings(mut self, settings: SettingsConfig) -> Self {
        self.config.settings = settings;
        self
    }

    /// Finalize and return the built `ResolverConfig`.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

/// Backend used for the string-keyed local storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under the storage root.
    #[default]
    File,
    /// Process-local map; nothing survives the process.
    Memory,
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Storage root for the file backend. Defaults to `~/.ticket-resolver/storage`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Ticket analysis simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Artificial latency before a result is shaped.
    #[serde(default = "default_analysis_delay_ms")]
    pub delay_ms: u64,
}

impl AnalysisConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_analysis_delay_ms(),
        }
    }
}

fn default_analysis_delay_ms() -> u64 {
    3000
}

/// Local sign-in/sign-up settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Artificial latency applied to sign-in and sign-up.
    #[serde(default = "default_auth_delay_ms")]
    pub delay_ms: u64,
    /// Minimum password length accepted at sign-up.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl AuthConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_auth_delay_ms(),
            min_password_len: default_min_password_len(),
        }
    }
}

fn default_auth_delay_ms() -> u64 {
    1500
}

fn default_min_password_len() -> usize {
    6
}

/// Settings dialog behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Artificial latency of the mock connection test.
    #[serde(default = "default_connection_test_delay_ms")]
    pub connection_test_delay_ms: u64,
}

impl SettingsConfig {
    pub fn connection_test_delay(&self) -> Duration {
        Duration::from_millis(self.connection_test_delay_ms)
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            connection_test_delay_ms: default_connection_test_delay_ms(),
        }
    }
}

fn default_connection_test_delay_ms() -> u64 {
    2000
}

//! Settings dialog operations.

use log::info;
use std::time::Duration;
use ticket_resolver_config::SettingsConfig;
use ticket_resolver_store::{SettingsError, SettingsRecord, SettingsStore};

/// Load, save and mock-test the API settings.
#[derive(Clone)]
pub struct SettingsService {
    store: SettingsStore,
    connection_test_delay: Duration,
}

impl SettingsService {
    pub fn new(store: SettingsStore, config: &SettingsConfig) -> Self {
        Self {
            store,
            connection_test_delay: config.connection_test_delay(),
        }
    }

    pub fn load(&self) -> Result<Option<SettingsRecord>, SettingsError> {
        self.store.load()
    }

    pub fn load_or_default(&self) -> Result<SettingsRecord, SettingsError> {
        self.store.load_or_default()
    }

    pub fn save(&self, record: &SettingsRecord) -> Result<(), SettingsError> {
        self.store.save(record)
    }

    pub fn is_connected(&self) -> Result<bool, SettingsError> {
        self.store.is_connected()
    }

    /// Pretend to reach the API with `record`. Nothing leaves the process.
    pub async fn test_connection(&self, record: &SettingsRecord) -> Result<(), SettingsError> {
        if !record.has_api_key() {
            return Err(SettingsError::ApiKeyMissing);
        }
        if !self.connection_test_delay.is_zero() {
            tokio::time::sleep(self.connection_test_delay).await;
        }
        info!(
            "connection test passed (model={}, index={})",
            record.model, record.index_name
        );
        Ok(())
    }
}

//! Locally stored API settings that gate ticket analysis.

use crate::SETTINGS_KEY;
use crate::error::{SettingsError, StoreError};
use crate::kv::{SharedStore, read_json, write_json};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// API settings saved from the settings dialog.
///
/// Older blobs written with the `gemini*`/`faiss*`/`enable*` field names are
/// still accepted on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    #[serde(default, alias = "geminiApiKey")]
    pub api_key: String,
    #[serde(default = "default_index_name", alias = "faissIndex")]
    pub index_name: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_enabled", alias = "enableLogging")]
    pub logging_enabled: bool,
    #[serde(default = "default_enabled", alias = "enableCache")]
    pub cache_enabled: bool,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_name: default_index_name(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            logging_enabled: default_enabled(),
            cache_enabled: default_enabled(),
        }
    }
}

impl SettingsRecord {
    /// Default settings with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// True when the API key is non-blank.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Check the record before it is persisted.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.has_api_key() {
            return Err(SettingsError::ApiKeyMissing);
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(SettingsError::InvalidField {
                field: "temperature",
                message: format!("{} is outside [0, 1]", self.temperature),
            });
        }
        if self.max_tokens == 0 {
            return Err(SettingsError::InvalidField {
                field: "maxTokens",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(SettingsError::InvalidField {
                field: "model",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_index_name() -> String {
    "ticket_embeddings".to_string()
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_enabled() -> bool {
    true
}

/// Reads and wholesale-overwrites the settings record.
#[derive(Clone)]
pub struct SettingsStore {
    store: SharedStore,
}

impl SettingsStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored settings, if any were ever saved.
    pub fn load(&self) -> Result<Option<SettingsRecord>, SettingsError> {
        let record: Option<SettingsRecord> = read_json(self.store.as_ref(), SETTINGS_KEY)?;
        debug!(
            "loaded settings (present={}, api_key_set={})",
            record.is_some(),
            record.as_ref().is_some_and(SettingsRecord::has_api_key)
        );
        Ok(record)
    }

    /// Stored settings, or defaults for a fresh settings form.
    ///
    /// A blob that no longer decodes also yields defaults, so the next save
    /// replaces it.
    pub fn load_or_default(&self) -> Result<SettingsRecord, SettingsError> {
        match self.load() {
            Ok(record) => Ok(record.unwrap_or_default()),
            Err(SettingsError::Store(StoreError::Serde(err))) => {
                warn!("stored settings unreadable, starting from defaults (error={err})");
                Ok(SettingsRecord::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Validate and replace the stored record.
    pub fn save(&self, record: &SettingsRecord) -> Result<(), SettingsError> {
        record.validate()?;
        write_json(self.store.as_ref(), SETTINGS_KEY, record)?;
        info!(
            "settings saved (model={}, index={}, logging={}, cache={})",
            record.model, record.index_name, record.logging_enabled, record.cache_enabled
        );
        Ok(())
    }

    /// True when saved settings carry an API key.
    pub fn is_connected(&self) -> Result<bool, SettingsError> {
        Ok(self
            .load()?
            .is_some_and(|record| record.has_api_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsRecord, SettingsStore};
    use crate::SETTINGS_KEY;
    use crate::error::SettingsError;
    use crate::kv::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn defaults_match_settings_dialog() {
        let record = SettingsRecord::default();
        assert_eq!(record.index_name, "ticket_embeddings");
        assert_eq!(record.model, "gemini-pro");
        assert_eq!(record.temperature, 0.7);
        assert_eq!(record.max_tokens, 1024);
        assert!(record.logging_enabled);
        assert!(record.cache_enabled);
        assert!(!record.has_api_key());
    }

    #[test]
    fn save_rejects_blank_api_key() {
        let store = SettingsStore::new(Arc::new(MemoryStore::new()));
        let err = store
            .save(&SettingsRecord::with_api_key("   "))
            .expect_err("blank key");
        assert!(matches!(err, SettingsError::ApiKeyMissing));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn save_rejects_out_of_range_temperature() {
        let store = SettingsStore::new(Arc::new(MemoryStore::new()));
        let record = SettingsRecord {
            temperature: 1.5,
            ..SettingsRecord::with_api_key("key")
        };
        let err = store.save(&record).expect_err("temperature");
        assert!(matches!(
            err,
            SettingsError::InvalidField {
                field: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn save_overwrites_wholesale() {
        let store = SettingsStore::new(Arc::new(MemoryStore::new()));
        store
            .save(&SettingsRecord {
                model: "gemini-1.5-pro".to_string(),
                ..SettingsRecord::with_api_key("first")
            })
            .expect("first save");
        store
            .save(&SettingsRecord::with_api_key("second"))
            .expect("second save");
        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded, SettingsRecord::with_api_key("second"));
        assert!(store.is_connected().expect("connected"));
    }

    #[test]
    fn reads_legacy_field_names() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(
            SETTINGS_KEY,
            r#"{"geminiApiKey":"abc","faissIndex":"idx","model":"gemini-pro","temperature":0.2,"maxTokens":512,"enableLogging":false,"enableCache":true}"#,
        )
        .expect("set");
        let store = SettingsStore::new(kv);
        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded.api_key, "abc");
        assert_eq!(loaded.index_name, "idx");
        assert_eq!(loaded.max_tokens, 512);
        assert!(!loaded.logging_enabled);
    }

    #[test]
    fn corrupt_blob_is_replaced_by_next_save() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(SETTINGS_KEY, "{not json").expect("set");
        let store = SettingsStore::new(kv);
        assert!(matches!(store.load(), Err(SettingsError::Store(_))));

        let mut record = store.load_or_default().expect("defaults");
        assert_eq!(record, SettingsRecord::default());
        record.api_key = "fresh".to_string();
        store.save(&record).expect("save");
        assert_eq!(store.load().expect("load"), Some(record));
    }

    #[test]
    fn whitespace_key_counts_as_missing() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(SETTINGS_KEY, r#"{"apiKey":"   "}"#).expect("set");
        let store = SettingsStore::new(kv);
        assert!(!store.is_connected().expect("connected"));
    }

    #[test]
    fn stored_record_with_empty_key_is_not_connected() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(SETTINGS_KEY, r#"{"apiKey":""}"#).expect("set");
        let store = SettingsStore::new(kv);
        assert!(store.load().expect("load").is_some());
        assert!(!store.is_connected().expect("connected"));
    }
}

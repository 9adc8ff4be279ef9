//! Browser-style local storage for the ticket resolver.
//!
//! Everything persisted by the demo is a string-keyed JSON blob. This crate
//! owns the storage backends and the three records kept in them: the
//! registered accounts, the API settings, and the intro-seen flag.
//!
//! Account passwords are stored in plaintext. That is a simplification of the
//! demo and must not be carried into anything that authenticates real users.

pub mod accounts;
pub mod error;
pub mod intro;
pub mod kv;
pub mod settings;

/// Storage key for the registered account list.
pub const ACCOUNTS_KEY: &str = "registeredUsers";
/// Storage key for the API settings record.
pub const SETTINGS_KEY: &str = "ai-ticket-resolver-settings";
/// Storage key for the intro-seen flag.
pub const INTRO_SEEN_KEY: &str = "ai-ticket-intro-seen";

/// Account records and the account directory.
pub use accounts::{AccountRecord, AccountStore};
/// Storage error types.
pub use error::{AccountError, SettingsError, StoreError};
/// Intro-seen flag.
pub use intro::IntroFlag;
/// Key/value storage abstraction and backends.
pub use kv::{FileStore, KeyValueStore, MemoryStore, SharedStore};
/// API settings record and store.
pub use settings::{SettingsRecord, SettingsStore};

//! Error types for local storage.

use thiserror::Error;

/// Errors returned by key/value storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors returned by the account directory.
#[derive(Debug, Error)]
pub enum AccountError {
    /// An account with the same email already exists.
    #[error("account already exists: {0}")]
    DuplicateAccount(String),
    /// No account is registered under the email.
    #[error("account not found: {0}")]
    AccountNotFound(String),
    /// The account exists but the password differs.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Underlying storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors returned when saving API settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The API key is blank.
    #[error("api key missing")]
    ApiKeyMissing,
    /// A field is outside its accepted range.
    #[error("invalid setting {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    /// Underlying storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

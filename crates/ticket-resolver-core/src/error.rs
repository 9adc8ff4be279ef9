//! Error types for analysis and authentication.

use thiserror::Error;
use ticket_resolver_store::AccountError;

/// Errors returned by ticket submission and analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required ticket fields were left empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingInformation(Vec<&'static str>),
    /// No settings record has been saved.
    #[error("api settings are not configured")]
    ConfigurationMissing,
    /// Settings exist but the API key is empty.
    #[error("api key missing from settings")]
    ApiKeyMissing,
    /// Shaping the analysis failed.
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}

impl AnalysisError {
    /// Whether the user should be sent to the settings dialog.
    pub fn requires_settings(&self) -> bool {
        matches!(self, Self::ConfigurationMissing | Self::ApiKeyMissing)
    }
}

/// Errors returned by sign-in and sign-up.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required form fields were left empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingInformation(Vec<&'static str>),
    /// Password shorter than the configured minimum.
    #[error("password must be at least {min_len} characters")]
    WeakPassword { min_len: usize },
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Account directory rejected the request.
    #[error(transparent)]
    Account(#[from] AccountError),
}

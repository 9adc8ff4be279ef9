//! User-facing notices for every outcome of the demo flows.

use crate::error::{AnalysisError, AuthError};
use serde::Serialize;
use ticket_resolver_store::{AccountError, AccountRecord, SettingsError};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Destructive,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
    /// Set when the user should be sent to the settings dialog.
    pub open_settings: bool,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            level,
            open_settings: false,
        }
    }

    fn success(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeLevel::Success)
    }

    fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeLevel::Destructive)
    }

    fn with_settings_prompt(mut self) -> Self {
        self.open_settings = true;
        self
    }

    pub fn analysis_complete() -> Self {
        Self::success("Analysis Complete", "AI has successfully analyzed your ticket")
    }

    pub fn welcome_back(account: &AccountRecord) -> Self {
        Self::success(
            "Welcome back!",
            format!("Successfully logged in as {}.", account.name),
        )
    }

    pub fn account_created() -> Self {
        Self::success(
            "Account Created Successfully!",
            "Please sign in with your new credentials.",
        )
    }

    pub fn settings_saved() -> Self {
        Self::success(
            "Settings Saved",
            "Your configuration has been saved successfully",
        )
    }

    pub fn connection_successful() -> Self {
        Self::success("Connection Successful", "API is working correctly")
    }

    pub fn feedback_received() -> Self {
        Self::success(
            "Feedback Received",
            "Thank you for helping us improve our AI system!",
        )
    }

    /// Shown when feedback is attempted before a result is ready.
    pub fn feedback_unavailable() -> Self {
        Self::new(
            "Feedback Unavailable",
            "Analyze a ticket before leaving feedback.",
            NoticeLevel::Info,
        )
    }
}

impl From<&AnalysisError> for Notice {
    fn from(err: &AnalysisError) -> Self {
        match err {
            AnalysisError::MissingInformation(_) => {
                Notice::destructive("Missing Information", "Please fill in all required fields")
            }
            AnalysisError::ConfigurationMissing => Notice::destructive(
                "Configuration Required",
                "Please configure your API settings first",
            )
            .with_settings_prompt(),
            AnalysisError::ApiKeyMissing => Notice::destructive(
                "API Key Missing",
                "Please add your API key in settings",
            )
            .with_settings_prompt(),
            AnalysisError::AnalysisFailed(_) => Notice::destructive(
                "Analysis Failed",
                "There was an error analyzing your ticket. Please try again.",
            ),
        }
    }
}

impl From<&AccountError> for Notice {
    fn from(err: &AccountError) -> Self {
        match err {
            AccountError::DuplicateAccount(_) => Notice::destructive(
                "Account Already Exists",
                "An account with this email already exists. Please log in.",
            ),
            AccountError::AccountNotFound(_) => Notice::destructive(
                "Account Not Found",
                "No account found with this email. Please sign up first.",
            ),
            AccountError::InvalidCredentials => Notice::destructive(
                "Invalid Credentials",
                "Incorrect password. Please try again.",
            ),
            AccountError::Store(source) => {
                Notice::destructive("Storage Error", source.to_string())
            }
        }
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::MissingInformation(fields) => Notice::destructive(
                "Missing Information",
                format!("Please fill in all fields ({}).", fields.join(", ")),
            ),
            AuthError::WeakPassword { min_len } => Notice::destructive(
                "Weak Password",
                format!("Password must be at least {min_len} characters long."),
            ),
            AuthError::PasswordMismatch => Notice::destructive(
                "Password Mismatch",
                "Passwords do not match. Please try again.",
            ),
            AuthError::Account(err) => Notice::from(err),
        }
    }
}

impl From<&SettingsError> for Notice {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::ApiKeyMissing => {
                Notice::destructive("Missing API Key", "Please enter your API key")
            }
            SettingsError::InvalidField { field, message } => {
                Notice::destructive("Invalid Settings", format!("{field} {message}"))
            }
            SettingsError::Store(source) => Notice::destructive("Storage Error", source.to_string()),
        }
    }
}

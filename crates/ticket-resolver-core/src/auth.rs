//! Local sign-up and sign-in over the account store.
//!
//! There are no sessions or tokens. A successful sign-in simply returns the
//! stored record.

use crate::error::AuthError;
use log::debug;
use std::time::Duration;
use ticket_resolver_config::AuthConfig;
use ticket_resolver_store::{AccountRecord, AccountStore};

/// Contents of the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Applies the form rules, then delegates to [`AccountStore`].
#[derive(Clone)]
pub struct AuthService {
    accounts: AccountStore,
    delay: Duration,
    min_password_len: usize,
}

impl AuthService {
    pub fn new(accounts: AccountStore, config: &AuthConfig) -> Self {
        Self {
            accounts,
            delay: config.delay(),
            min_password_len: config.min_password_len,
        }
    }

    pub fn min_password_len(&self) -> usize {
        self.min_password_len
    }

    /// Validate the form and register a new account.
    pub async fn sign_up(&self, form: &SignupForm) -> Result<AccountRecord, AuthError> {
        let missing: Vec<&'static str> = [
            ("name", &form.name),
            ("email", &form.email),
            ("password", &form.password),
            ("confirm_password", &form.confirm_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(AuthError::MissingInformation(missing));
        }
        if form.password.chars().count() < self.min_password_len {
            return Err(AuthError::WeakPassword {
                min_len: self.min_password_len,
            });
        }
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        self.pause().await;
        Ok(self
            .accounts
            .register(&form.email, &form.password, &form.name)?)
    }

    /// Check credentials and return the matching account.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AccountRecord, AuthError> {
        let missing: Vec<&'static str> = [("email", email), ("password", password)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(AuthError::MissingInformation(missing));
        }

        self.pause().await;
        Ok(self.accounts.authenticate(email, password)?)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            debug!("simulating auth latency (delay_ms={})", self.delay.as_millis());
            tokio::time::sleep(self.delay).await;
        }
    }
}

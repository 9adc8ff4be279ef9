//! Local account directory simulating signup and login without a backend.

use crate::ACCOUNTS_KEY;
use crate::error::AccountError;
use crate::kv::{SharedStore, read_json, write_json};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A registered account. Email is the case-sensitive unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    pub email: String,
    /// Plaintext; the demo never hashes passwords.
    pub password: String,
    pub name: String,
}

/// Insertion-ordered account list persisted under [`ACCOUNTS_KEY`].
///
/// Records are only ever appended; there is no update or delete.
#[derive(Clone)]
pub struct AccountStore {
    store: SharedStore,
}

impl AccountStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All registered accounts in registration order.
    pub fn list(&self) -> Result<Vec<AccountRecord>, AccountError> {
        let accounts: Option<Vec<AccountRecord>> = read_json(self.store.as_ref(), ACCOUNTS_KEY)?;
        Ok(accounts.unwrap_or_default())
    }

    /// Look up an account by exact email.
    pub fn find(&self, email: &str) -> Result<Option<AccountRecord>, AccountError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|record| record.email == email))
    }

    /// Append a new account and rewrite the full list.
    ///
    /// Password policy is the caller's responsibility.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AccountRecord, AccountError> {
        let mut accounts = self.list()?;
        if accounts.iter().any(|record| record.email == email) {
            debug!("registration rejected, email taken (email={email})");
            return Err(AccountError::DuplicateAccount(email.to_string()));
        }
        let record = AccountRecord {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        accounts.push(record.clone());
        write_json(self.store.as_ref(), ACCOUNTS_KEY, &accounts)?;
        info!(
            "registered account (email={}, accounts={})",
            email,
            accounts.len()
        );
        Ok(record)
    }

    /// Check credentials against the stored record for `email`.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<AccountRecord, AccountError> {
        let Some(record) = self.find(email)? else {
            debug!("authentication failed, unknown email (email={email})");
            return Err(AccountError::AccountNotFound(email.to_string()));
        };
        if record.password != password {
            debug!("authentication failed, password mismatch (email={email})");
            return Err(AccountError::InvalidCredentials);
        }
        info!("authenticated account (email={email})");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountRecord, AccountStore};
    use crate::ACCOUNTS_KEY;
    use crate::error::AccountError;
    use crate::kv::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn store() -> (Arc<MemoryStore>, AccountStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), AccountStore::new(kv))
    }

    #[test]
    fn duplicate_email_keeps_first_record() {
        let (_, accounts) = store();
        accounts
            .register("ada@example.com", "secret1", "Ada")
            .expect("first");
        let err = accounts
            .register("ada@example.com", "other99", "Impostor")
            .expect_err("duplicate");
        assert!(matches!(err, AccountError::DuplicateAccount(email) if email == "ada@example.com"));
        assert_eq!(
            accounts.list().expect("list"),
            vec![AccountRecord {
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
                name: "Ada".to_string(),
            }]
        );
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let (_, accounts) = store();
        accounts
            .register("ada@example.com", "secret1", "Ada")
            .expect("first");
        accounts
            .register("Ada@example.com", "secret2", "Other Ada")
            .expect("distinct email");
        let err = accounts
            .authenticate("ADA@EXAMPLE.COM", "secret1")
            .expect_err("unknown");
        assert!(matches!(err, AccountError::AccountNotFound(_)));
    }

    #[test]
    fn authenticate_distinguishes_failures() {
        let (_, accounts) = store();
        accounts
            .register("grace@example.com", "hopper", "Grace")
            .expect("register");

        let err = accounts
            .authenticate("nobody@example.com", "hopper")
            .expect_err("unknown");
        assert!(matches!(err, AccountError::AccountNotFound(_)));

        let err = accounts
            .authenticate("grace@example.com", "wrong!")
            .expect_err("wrong password");
        assert!(matches!(err, AccountError::InvalidCredentials));

        let record = accounts
            .authenticate("grace@example.com", "hopper")
            .expect("login");
        assert_eq!(record.name, "Grace");
    }

    #[test]
    fn registration_order_is_preserved_in_storage() {
        let (kv, accounts) = store();
        accounts.register("b@example.com", "bbbbbb", "B").expect("b");
        accounts.register("a@example.com", "aaaaaa", "A").expect("a");
        let raw = kv.get(ACCOUNTS_KEY).expect("get").expect("present");
        let decoded: Vec<AccountRecord> = serde_json::from_str(&raw).expect("decode");
        let emails: Vec<&str> = decoded.iter().map(|record| record.email.as_str()).collect();
        assert_eq!(emails, vec!["b@example.com", "a@example.com"]);
    }

    #[test]
    fn corrupt_account_list_surfaces_store_error() {
        let (kv, accounts) = store();
        kv.set(ACCOUNTS_KEY, "{not json").expect("set");
        let err = accounts
            .register("a@example.com", "aaaaaa", "A")
            .expect_err("corrupt");
        assert!(matches!(err, AccountError::Store(_)));
    }
}

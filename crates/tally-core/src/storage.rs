use std::collections::HashMap;

use tally_domain::{Theme, Transaction};
use tracing::{debug, info};

use crate::CoreError;

/// Key holding the JSON-encoded transaction log.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key holding the theme preference as a bare `light` / `dark` string.
pub const THEME_KEY: &str = "theme";

/// Abstraction over durable string key-value backends.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Volatile key-value store used for tests and throwaway sessions.
///
/// Writes can be made to fail on demand to exercise quota-style errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    write_failure: Option<String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with `reason`, or succeed again when `None`.
    pub fn set_write_failure(&mut self, reason: Option<String>) {
        self.write_failure = reason;
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    fn check_writable(&self) -> Result<(), CoreError> {
        match &self.write_failure {
            Some(reason) => Err(CoreError::Persistence(reason.clone())),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}

/// Persistence adapter that round-trips the transaction log and theme through a [`KeyValueStore`].
pub struct TransactionRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TransactionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Serializes the full log and overwrites the stored value.
    pub fn save<'a, I>(&mut self, transactions: I) -> Result<(), CoreError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let snapshot: Vec<&Transaction> = transactions.into_iter().collect();
        let json = serde_json::to_string(&snapshot)?;
        self.store.set(TRANSACTIONS_KEY, &json)?;
        debug!(count = snapshot.len(), "transaction log saved");
        Ok(())
    }

    /// Reads the stored log. A missing key yields an empty log; a malformed value is an error.
    pub fn load(&self) -> Result<Vec<Transaction>, CoreError> {
        let Some(raw) = self.store.get(TRANSACTIONS_KEY)? else {
            info!("no stored transactions, starting with an empty log");
            return Ok(Vec::new());
        };
        let transactions: Vec<Transaction> = serde_json::from_str(&raw).map_err(|err| {
            CoreError::Persistence(format!("stored transaction log is malformed: {err}"))
        })?;
        info!(count = transactions.len(), "transaction log loaded");
        Ok(transactions)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), CoreError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Reads the theme preference, defaulting to light when none is stored.
    pub fn load_theme(&self) -> Result<Theme, CoreError> {
        match self.store.get(THEME_KEY)? {
            Some(raw) => raw.parse().map_err(|err| {
                CoreError::Persistence(format!("stored theme is invalid: {err}"))
            }),
            None => Ok(Theme::default()),
        }
    }
}

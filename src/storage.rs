/// Preference storage: hostname → dark mode enabled
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

/// A flat, persisted hostname → boolean map
///
/// Missing keys read as `false`. Writes are single-key and last write wins.
/// `set` resolves only once the value is durable.
#[allow(async_fn_in_trait)]
pub trait PreferenceStore {
    async fn get(&self, hostname: &str) -> Result<bool>;

    async fn set(&self, hostname: &str, enabled: bool) -> Result<()>;
}

/// In-memory store, used by tests and anywhere persistence is not wanted
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        MemoryStore {
            entries: RefCell::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Copy of every stored entry
    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.entries.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, hostname: &str) -> Result<bool> {
        Ok(self.entries.borrow().get(hostname).copied().unwrap_or(false))
    }

    async fn set(&self, hostname: &str, enabled: bool) -> Result<()> {
        self.entries.borrow_mut().insert(hostname.to_string(), enabled);
        Ok(())
    }
}

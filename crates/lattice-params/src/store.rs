//! # Parameter Store and Epoch Snapshots
//!
//! Two pieces of plumbing for allow-list configuration:
//!
//! - [`ParamStore`]: the persistence seam the migration writes through.
//!   A store only accepts keys its key table recognizes, mirroring the
//!   chain's parameter subspace discipline.
//! - [`RegistryCell`]: single-writer, multi-reader snapshot cell for the
//!   live registry. Readers take a complete `Arc` snapshot; the writer
//!   swaps in the next epoch's registry atomically. No reader can observe
//!   a partially updated allow-list.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::registry::MessageSchemaRegistry;

/// Parameter-store key under which the allow-list is persisted.
pub const SIGN_SCHEMAS_PARAM_KEY: &str = "SignSchemas";

/// Minimal persistence seam for chain parameters.
///
/// The real chain backs this with its parameter subspace; tests and local
/// tooling use [`MemParamStore`].
pub trait ParamStore {
    /// Whether the store's key table recognizes `key`. Writes to an
    /// unrecognized key must be refused by the caller, loudly.
    fn recognizes(&self, key: &str) -> bool;

    /// Whether a value is present under `key`.
    fn has(&self, key: &str) -> bool;

    /// Raw parameter bytes under `key`, if present.
    fn get_raw(&self, key: &str) -> Option<Vec<u8>>;

    /// Persist raw parameter bytes under `key`.
    fn set_raw(&mut self, key: &str, bytes: Vec<u8>);
}

/// In-memory [`ParamStore`] with an explicit key table.
#[derive(Debug, Default)]
pub struct MemParamStore {
    key_table: HashSet<String>,
    values: HashMap<String, Vec<u8>>,
}

impl MemParamStore {
    /// A store whose key table does not yet recognize any parameter.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose key table recognizes the allow-list parameter.
    pub fn with_sign_schemas_key() -> Self {
        let mut store = Self::default();
        store.register_key(SIGN_SCHEMAS_PARAM_KEY);
        store
    }

    /// Register a key in the key table.
    pub fn register_key(&mut self, key: impl Into<String>) {
        self.key_table.insert(key.into());
    }
}

impl ParamStore for MemParamStore {
    fn recognizes(&self, key: &str) -> bool {
        self.key_table.contains(key)
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.values.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, bytes: Vec<u8>) {
        self.values.insert(key.to_string(), bytes);
    }
}

/// Atomically swappable registry snapshot for one parameter epoch.
///
/// `snapshot()` hands out the current `Arc`; after that the reader works
/// lock-free against an immutable registry for the request's lifetime.
/// `swap()` installs the next epoch's registry in one step.
#[derive(Debug)]
pub struct RegistryCell {
    current: RwLock<Arc<MessageSchemaRegistry>>,
}

impl RegistryCell {
    pub fn new(registry: MessageSchemaRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// The current epoch's registry snapshot.
    pub fn snapshot(&self) -> Arc<MessageSchemaRegistry> {
        // A poisoned lock only means a panic elsewhere while holding the
        // guard; the registry itself is immutable, so the value is intact.
        let guard = match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }

    /// Install the next epoch's registry, returning the previous snapshot.
    pub fn swap(&self, next: MessageSchemaRegistry) -> Arc<MessageSchemaRegistry> {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, Arc::new(next))
    }
}

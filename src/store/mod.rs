//! Persistence seam.
//!
//! The core never talks to real storage; it reads and writes JSON payloads
//! through the [`StateStore`] trait. The embedder supplies the backend
//! (browser local storage, a file, a database row) and the key namespace.
//!
//! ## Failure policy
//!
//! Absent keys are defaults, malformed payloads are logged and treated as
//! defaults. Loading never produces a hard failure that could block startup.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key-value persistence the session reads and writes through.
///
/// Payloads are JSON strings; keys are opaque to the store.
pub trait StateStore {
    /// Read a payload, `None` if the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a payload, replacing any existing value.
    fn put(&mut self, key: &str, value: &str);
}

/// Deserialize a stored payload, falling back to the default on absence or
/// parse failure.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: StateStore + ?Sized,
{
    match store.get(key) {
        None => T::default(),
        Some(payload) => match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("malformed payload at {key}: {err}; using defaults");
                T::default()
            }
        },
    }
}

/// Serialize and write a value.
///
/// Serialization of the crate's state types cannot fail; a failure would
/// indicate a bug, so it is logged and the write skipped.
pub fn save<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize,
    S: StateStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(payload) => store.put(key, &payload),
        Err(err) => log::error!("failed to serialize {key}: {err}"),
    }
}

/// In-memory store for tests and embedders without real storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

//! The in-memory store
//!
//! A mapping from string keys to arbitrary JSON values, owned by the
//! server that serves it. Never persisted; dropped with its owner.

use serde_json::{Map, Value};

/// The server's single in-memory key-value mapping.
///
/// Created empty, mutated in place by [`Store::merge`] and
/// [`Store::clear`], read (without mutation) through
/// [`Store::snapshot`]. Each server owns its own instance, so
/// independent servers never share state.
#[derive(Debug, Default)]
pub struct Store {
    entries: Map<String, Value>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Store {
        Store {
            entries: Map::new(),
        }
    }

    /// Shallow top-level merge.
    ///
    /// Every incoming key is inserted, overwriting an existing entry
    /// under the same key. Keys absent from `incoming` are retained.
    pub fn merge(&mut self, incoming: Map<String, Value>) {
        for (key, value) in incoming {
            self.entries.insert(key, value);
        }
    }

    /// Remove all entries. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The current contents, the serializable view sent as a `get` reply
    pub fn snapshot(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Look up a single key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

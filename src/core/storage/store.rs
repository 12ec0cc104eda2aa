// src/core/storage/store.rs

//! The key space: a single hash map from key bytes to a dynamically-typed
//! value, plus the snapshot path used for persistence.

use super::value::Value;
use crate::core::errors::ExoDbError;
use crate::core::persistence;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct Store {
    data: HashMap<Bytes, Value>,
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self {
            data: HashMap::new(),
            path,
        }
    }

    /// Loads the store's keyspace from its snapshot path, replacing whatever
    /// is currently in memory. If the path does not exist yet this is a
    /// no-op, matching a fresh first run. A corrupt or truncated snapshot is
    /// logged and does not prevent startup: the store falls back to an empty
    /// keyspace rather than aborting.
    pub fn load(&mut self) -> Result<(), ExoDbError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot found, starting empty");
            return Ok(());
        }
        match persistence::load(&self.path) {
            Ok(data) => {
                self.data = data;
                info!(path = %self.path.display(), keys = self.data.len(), "loaded snapshot");
            }
            Err(ExoDbError::LoadError(msg)) => {
                warn!(path = %self.path.display(), error = %msg, "snapshot failed to load, starting with an empty store");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Sweeps expired keys, then writes the keyspace to the snapshot path.
    pub fn save(&mut self) -> Result<(), ExoDbError> {
        self.expire_sweep();
        persistence::save(&self.path, &self.data)?;
        info!(path = %self.path.display(), keys = self.data.len(), "saved snapshot");
        Ok(())
    }

    /// True if the key is present and, if it carries a TTL, not yet expired.
    /// A stale entry found during the check is removed.
    pub fn key_exists(&mut self, key: &Bytes) -> bool {
        self.expire_if_needed(key);
        self.data.contains_key(key)
    }

    /// Looks up a key, evicting it first if it has silently gone stale.
    pub fn get(&mut self, key: &Bytes) -> Option<&Value> {
        self.expire_if_needed(key);
        self.data.get(key)
    }

    /// Returns the value for `key`, inserting `default()` first if absent or
    /// expired. Used by commands that lazily create their target (SETBIT,
    /// ZADD).
    pub fn get_or_insert_with(
        &mut self,
        key: &Bytes,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        self.expire_if_needed(key);
        self.data.entry(key.clone()).or_insert_with(default)
    }

    pub fn set(&mut self, key: Bytes, value: Value) {
        self.data.insert(key, value);
    }

    fn expire_if_needed(&mut self, key: &Bytes) {
        if matches!(self.data.get(key), Some(v) if v.has_expired()) {
            self.data.remove(key);
        }
    }

    /// Removes every key whose TTL has passed. Runs on a periodic timer
    /// rather than per-key, per the server's event-loop design.
    pub fn expire_sweep(&mut self) -> usize {
        let before = self.data.len();
        self.data.retain(|_, v| !v.has_expired());
        before - self.data.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

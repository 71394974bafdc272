//! Generic string-keyed persistence backend.
//!
//! The planner core needs nothing more than `get`/`set` against two fixed
//! keys, one per entity collection. Backends that can make a multi-key write
//! atomic should override [`KvBackend::set_many`]; the default falls back to
//! sequential `set` calls.

use std::collections::HashMap;

use crate::error::StoreError;

/// String-keyed persistence capability.
pub trait KvBackend {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write several keys as one commit where the backend supports it.
    fn set_many(&mut self, pairs: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory backend for tests and isolated planner instances.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_roundtrip() {
        let mut backend = MemoryBackend::new();
        assert!(backend.get("groups").unwrap().is_none());
        backend.set("groups", "[]").unwrap();
        assert_eq!(backend.get("groups").unwrap().unwrap(), "[]");
    }

    #[test]
    fn memory_backend_last_writer_wins() {
        let mut backend = MemoryBackend::new();
        backend.set("items", "[1]").unwrap();
        backend.set("items", "[2]").unwrap();
        assert_eq!(backend.get("items").unwrap().unwrap(), "[2]");
    }

    #[test]
    fn set_many_writes_all_keys() {
        let mut backend = MemoryBackend::new();
        backend
            .set_many(&[("groups", "[]".to_string()), ("items", "[]".to_string())])
            .unwrap();
        assert_eq!(backend.get("groups").unwrap().unwrap(), "[]");
        assert_eq!(backend.get("items").unwrap().unwrap(), "[]");
    }
}

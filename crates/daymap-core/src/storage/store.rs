//! Entity store: raw load/save of the two entity collections over a
//! [`KvBackend`].
//!
//! Each save fully replaces the backing collection (last-writer-wins).
//! Reads never fail: a missing or corrupted payload is logged and treated as
//! an empty collection.

use tracing::warn;

use crate::error::StoreError;
use crate::plan::{Group, Item};
use crate::storage::backend::KvBackend;

/// Backing key for the group collection.
pub const KEY_GROUPS: &str = "groups";
/// Backing key for the item collection.
pub const KEY_ITEMS: &str = "items";

/// Load/save access to the group and item collections.
pub struct EntityStore {
    backend: Box<dyn KvBackend>,
}

impl EntityStore {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        EntityStore { backend }
    }

    /// Load the group collection. Missing or corrupted data yields an empty
    /// collection.
    pub fn load_groups(&self) -> Vec<Group> {
        self.load_collection(KEY_GROUPS)
    }

    /// Load the item collection. Missing or corrupted data yields an empty
    /// collection.
    pub fn load_items(&self) -> Vec<Item> {
        self.load_collection(KEY_ITEMS)
    }

    /// Replace the persisted group collection.
    pub fn save_groups(&mut self, groups: &[Group]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(groups)?;
        self.backend.set(KEY_GROUPS, &payload)
    }

    /// Replace the persisted item collection.
    pub fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(items)?;
        self.backend.set(KEY_ITEMS, &payload)
    }

    /// Replace both collections in a single backend commit.
    ///
    /// Operations that touch group membership and item ownership together go
    /// through here so a crash cannot land between the two writes.
    pub fn save_all(&mut self, groups: &[Group], items: &[Item]) -> Result<(), StoreError> {
        let group_payload = serde_json::to_string(groups)?;
        let item_payload = serde_json::to_string(items)?;
        self.backend
            .set_many(&[(KEY_GROUPS, group_payload), (KEY_ITEMS, item_payload)])
    }

    fn load_collection<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read collection, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entities) => entities,
            Err(e) => {
                warn!(key, error = %e, "corrupted collection payload, treating as empty");
                Vec::new()
            }
        }
    }
}

//! Normalized entity cache
//!
//! Collections are keyed by server-assigned ID, mirroring whatever the
//! server returns. `all_loaded` distinguishes "fully fetched" from "never
//! fetched", since an empty map is ambiguous with "not loaded".

use std::collections::HashMap;

use crate::error::ClientError;
use shared::Entity;

/// One cached collection with its load/permission flags
#[derive(Debug)]
pub struct EntityCache<T> {
    entities: HashMap<String, T>,
    pub all_loaded: bool,
    pub loading: bool,
    pub forbidden: bool,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            all_loaded: false,
            loading: false,
            forbidden: false,
        }
    }
}

impl<T: Entity> EntityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when a fetch should be dispatched: not loaded, not already in
    /// flight, not forbidden. The `loading` check suppresses duplicate
    /// concurrent requests for the same slice.
    pub fn needs_fetch(&self) -> bool {
        !self.all_loaded && !self.loading && !self.forbidden
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the whole collection from a bulk fetch
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.entities = items
            .into_iter()
            .map(|item| (item.id().to_string(), item))
            .collect();
        self.all_loaded = true;
        self.loading = false;
        self.forbidden = false;
    }

    /// Merge the server echo of a create or update. A create keys the
    /// cache by the newly assigned ID; an update replaces in place without
    /// duplicating the key.
    pub fn upsert(&mut self, item: T) {
        self.entities.insert(item.id().to_string(), item);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.entities.remove(id)
    }

    /// Record a load failure: 403 marks the slice forbidden and stops
    /// further retries; any other error only resets `loading`.
    pub fn load_failed(&mut self, err: &ClientError) {
        self.loading = false;
        if err.is_forbidden() {
            self.forbidden = true;
        }
    }

    /// Drop everything, including flags (logout or cascade invalidation)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

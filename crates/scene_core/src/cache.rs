//! Shared resource cache.
//!
//! Capabilities often want to reuse an expensive resource across builds
//! (a shared geometry, a texture handle). The cache is an explicit
//! component owned by the session and drained at teardown; it is never a
//! module-level singleton, so two sessions cannot leak resources into each
//! other.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// String-keyed get-or-create store with an explicit drain lifecycle.
#[derive(Debug)]
pub struct ResourceCache<T> {
    entries: BTreeMap<String, T>,
    hits: u64,
    misses: u64,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, building it on first use.
    pub fn get_or_create(&mut self, key: &str, build: impl FnOnce() -> T) -> &T {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(e) => {
                self.hits += 1;
                e.into_mut()
            }
            Entry::Vacant(v) => {
                self.misses += 1;
                log::debug!("cache miss for {key:?}");
                v.insert(build())
            }
        }
    }

    /// Drain every entry through `dispose` (key order). Part of scene
    /// teardown; hit/miss totals survive for the session log.
    pub fn dispose_all(&mut self, mut dispose: impl FnMut(T)) {
        let n = self.entries.len();
        for (_, v) in std::mem::take(&mut self.entries) {
            dispose(v);
        }
        log::debug!(
            "cache drained: {n} entries ({} hits / {} misses)",
            self.hits,
            self.misses
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

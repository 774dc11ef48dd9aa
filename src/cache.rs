//! In-memory store of already scraped pages.
//!
//! Entries live until they are overwritten or the whole cache is [`reset`](PageCache::reset);
//! there is no expiry. Every operation takes the lock once, so a single page is
//! never observed half-written.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::item::Item;
use crate::PageIndex;

/// Items of one page in upstream listing order. Shared and immutable once stored.
pub type PageEntry = Arc<[Item]>;

#[derive(Debug, Default)]
pub struct PageCache {
    // A page is known iff it has an entry, so the map doubles as the known set.
    pages: RwLock<BTreeMap<PageIndex, PageEntry>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pages of `requested` that are not cached, each once,
    /// in the order they first appear in `requested`.
    pub fn missing(&self, requested: impl IntoIterator<Item = PageIndex>) -> Vec<PageIndex> {
        let pages = self.read();
        let mut seen = HashSet::new();
        requested
            .into_iter()
            .filter(|page| !pages.contains_key(page) && seen.insert(*page))
            .collect()
    }

    pub fn get(&self, page: PageIndex) -> Option<PageEntry> {
        self.read().get(&page).cloned()
    }

    /// Stores `items` under `page`, replacing whatever was there.
    pub fn put(&self, page: PageIndex, items: impl Into<PageEntry>) {
        self.write().insert(page, items.into());
    }

    /// All cached page indices, ascending.
    pub fn known(&self) -> Vec<PageIndex> {
        self.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops every entry.
    pub fn reset(&self) {
        self.write().clear();
    }

    // Writers never leave the map half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<PageIndex, PageEntry>> {
        self.pages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<PageIndex, PageEntry>> {
        self.pages.write().unwrap_or_else(PoisonError::into_inner)
    }
}

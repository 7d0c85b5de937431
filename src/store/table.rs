//! Snapshot storage and atomic replacement.
//!
//! # Design Decisions
//! - `Table` holds an `ArcSwap<Snapshot>`: lookups load the current pointer
//!   without locking, reload stores a new pointer in one atomic step
//! - A reader holding an old `Arc<Snapshot>` keeps it alive until dropped,
//!   so it never sees a mix of old and new entries

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::store::entry::Entry;

/// An immutable, fully parsed key → entry mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: HashMap<String, Entry>,
}

impl Snapshot {
    pub(crate) fn from_map(entries: HashMap<String, Entry>) -> Self {
        Self { entries }
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shared, swappable view of the current snapshot.
#[derive(Debug, Default)]
pub struct Table {
    current: ArcSwap<Snapshot>,
}

impl Table {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Look up `key` in the current snapshot.
    pub fn get(&self, key: &str) -> Option<Entry> {
        self.current.load().get(key).cloned()
    }

    /// Pin the current snapshot for several reads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Swap in `next` for all subsequent lookups, returning the old snapshot.
    pub fn replace(&self, next: Snapshot) -> Arc<Snapshot> {
        self.current.swap(Arc::new(next))
    }
}

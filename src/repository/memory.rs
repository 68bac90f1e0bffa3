//! In-memory entity store keyed by server-assigned ids

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};

/// Hands out 1, 2, 3, ... to concurrent callers
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicI64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Return to the initial state; the next id handed out is 1 again
    pub fn reset(&self) {
        self.last.store(0, Ordering::SeqCst);
    }
}

/// Map from id to entity plus the allocator that feeds it. Creation and
/// clearing both take the write lock so an id allocated before a reset can
/// never be inserted after it.
#[derive(Debug)]
pub struct EntityStore<T> {
    ids: IdAllocator,
    entries: RwLock<HashMap<i64, T>>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            ids: IdAllocator::new(),
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<i64, T>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<i64, T>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate the next id, build the entity for it and store it
    pub fn insert_new(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut entries = self.write();
        let id = self.ids.next_id();
        let entity = build(id);
        entries.insert(id, entity.clone());
        entity
    }

    /// Unconditional upsert
    pub fn put(&self, id: i64, entity: T) {
        self.write().insert(id, entity);
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.read().get(&id).cloned()
    }

    /// Entities whose ids fall in `[start, start + count)`, in id order.
    /// Absent ids are skipped, so gaps shrink the result.
    pub fn get_range(&self, start: i64, count: i64) -> Vec<T> {
        if count <= 0 {
            return Vec::new();
        }
        let end = start.saturating_add(count);
        let entries = self.read();
        (start..end).filter_map(|id| entries.get(&id).cloned()).collect()
    }

    /// Mutate an entity in place. Returns `None` when the id is absent.
    pub fn update<R>(&self, id: i64, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.write().get_mut(&id).map(f)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove everything and reset the id allocator
    pub fn clear(&self) {
        let mut entries = self.write();
        entries.clear();
        self.ids.reset();
    }
}

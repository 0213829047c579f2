use crate::LinkLocks;
use chaos_types::LinkId;
use dashmap::DashMap;
use std::sync::Arc;

/// Registry of per-direction locks, keyed by the link's stable id.
/// Forward and reverse directions of the same undirected pair carry
/// distinct ids and, thanks to that, distinct entries here.
#[derive(Default)]
pub struct LinkLockTable {
    locks: DashMap<LinkId, Arc<LinkLocks>>,
}

impl LinkLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: LinkId) {
        self.locks.entry(id).or_insert_with(|| Arc::new(LinkLocks::new()));
    }

    pub fn get(&self, id: LinkId) -> Option<Arc<LinkLocks>> {
        self.locks.get(&id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let table = LinkLockTable::new();
        table.register(LinkId(1));
        table.register(LinkId(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn distinct_directions_get_distinct_locks() {
        let table = LinkLockTable::new();
        table.register(LinkId(1));
        table.register(LinkId(2));
        let a = table.get(LinkId(1)).unwrap();
        let b = table.get(LinkId(2)).unwrap();
        assert!(a.try_acquire_in_use());
        assert!(b.try_acquire_in_use());
    }
}

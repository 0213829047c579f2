//! Per-directed-link locking.
//!
//! Each direction of a link carries two locks:
//!
//! - `in_use`: a non-blocking permit held for the whole lifetime of a
//!   reversible, long-running event (from the moment it fires until its
//!   undo completes). At most one such event runs per direction at a
//!   time; a producer that can't acquire it skips the direction rather
//!   than waiting.
//! - `modify`: a blocking mutex held only across a single read-modify-write
//!   of the five shaping fields, so the tuple is never torn.
//!
//! `modify` is always acquired after `in_use` (when both are needed) and
//! released before `in_use` is released.

mod table;

pub use table::LinkLockTable;

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard};

pub struct LinkLocks {
    in_use: AtomicBool,
    modify: Mutex<()>,
}

impl Default for LinkLocks {
    fn default() -> Self {
        Self {
            in_use: AtomicBool::new(false),
            modify: Mutex::new(()),
        }
    }
}

impl LinkLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking: returns `true` if this caller now owns the permit.
    pub fn try_acquire_in_use(&self) -> bool {
        self.in_use
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the `in_use` permit. Safe to call from a different task
    /// than the one that acquired it (the undo scheduler releases on
    /// behalf of the producer that fired the event).
    pub fn release_in_use(&self) {
        self.in_use.store(false, Ordering::Release);
    }

    pub fn in_use(&self) -> bool {
        self.in_use.load(Ordering::Acquire)
    }

    /// Blocking acquire of the fine-grained modify lock.
    pub async fn enter_modify(&self) -> MutexGuard<'_, ()> {
        self.modify.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn in_use_is_exclusive() {
        let locks = LinkLocks::new();
        assert!(locks.try_acquire_in_use());
        assert!(!locks.try_acquire_in_use());
        locks.release_in_use();
        assert!(locks.try_acquire_in_use());
    }

    #[tokio::test]
    async fn modify_serializes_concurrent_writers() {
        let locks = Arc::new(LinkLocks::new());
        let counter = Arc::new(tokio::sync::Mutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.enter_modify().await;
                let mut c = counter.lock().await;
                *c += 1;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(*counter.lock().await, 8);
    }
}

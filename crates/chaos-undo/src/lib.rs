//! A min-heap of deadlined undo actions drained by a single consumer task.
//!
//! Producers enqueue an action with a deadline; the consumer fires
//! actions at or after their deadline, polling for shutdown at least
//! once a second so it never blocks a clean exit for long. On shutdown
//! the remaining queue is drained synchronously, in deadline order,
//! ignoring deadlines entirely.

use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

pub type UndoAction = Pin<Box<dyn Future<Output = ()> + Send>>;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

struct Entry {
    deadline: Instant,
    seq: u64,
    action: UndoAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so `BinaryHeap` (a max-heap) pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct UndoScheduler {
    heap: Mutex<BinaryHeap<Entry>>,
    seq: AtomicU64,
    shutting_down: AtomicBool,
}

impl UndoScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            heap: Mutex::new(BinaryHeap::new()),
            seq: AtomicU64::new(0),
            shutting_down: AtomicBool::new(false),
        })
    }

    pub fn enqueue_at(&self, deadline: Instant, action: UndoAction) {
        let seq = self.seq.fetch_add(1, AtomicOrdering::Relaxed);
        self.heap.lock().push(Entry {
            deadline,
            seq,
            action,
        });
    }

    pub fn enqueue_in(&self, duration: Duration, action: UndoAction) {
        self.enqueue_at(Instant::now() + duration, action);
    }

    pub fn pending(&self) -> usize {
        self.heap.lock().len()
    }

    /// Signals the consumer loop to stop waiting and drain everything.
    pub fn shutdown(&self) {
        self.shutting_down.store(true, AtomicOrdering::Release);
    }

    /// Spawns the single background consumer. Normal operation fires
    /// entries at or after their deadline; once `shutdown()` has been
    /// called it drains the remaining queue immediately, in priority
    /// order, then returns.
    pub fn spawn_consumer(self: &Arc<Self>) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            loop {
                if this.shutting_down.load(AtomicOrdering::Acquire) {
                    this.drain_all().await;
                    return;
                }

                let next_deadline = this.heap.lock().peek().map(|e| e.deadline);
                match next_deadline {
                    None => tokio::time::sleep(POLL_INTERVAL).await,
                    Some(deadline) => {
                        let now = Instant::now();
                        if deadline <= now {
                            if let Some(entry) = this.heap.lock().pop() {
                                entry.action.await;
                            }
                        } else {
                            tokio::time::sleep((deadline - now).min(POLL_INTERVAL)).await;
                        }
                    }
                }
            }
        })
    }

    async fn drain_all(&self) {
        loop {
            let next = self.heap.lock().pop();
            match next {
                Some(entry) => {
                    debug!("draining undo entry on shutdown");
                    entry.action.await;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test(start_paused = true)]
    async fn fires_in_deadline_order() {
        let scheduler = UndoScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, secs) in [(3, 300), (1, 60), (2, 120)] {
            let order = order.clone();
            scheduler.enqueue_in(
                Duration::from_secs(secs),
                Box::pin(async move {
                    order.lock().push(label);
                }),
            );
        }

        let handle = scheduler.spawn_consumer();
        tokio::time::advance(Duration::from_secs(301)).await;
        scheduler.shutdown();
        handle.await.unwrap();

        assert_eq!(*order.lock(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn shutdown_drains_regardless_of_deadline() {
        let scheduler = UndoScheduler::new();
        let fired = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let fired = fired.clone();
            scheduler.enqueue_in(
                Duration::from_secs(600),
                Box::pin(async move {
                    fired.fetch_add(1, AtomicOrdering::SeqCst);
                }),
            );
        }

        scheduler.shutdown();
        let handle = scheduler.spawn_consumer();
        handle.await.unwrap();

        assert_eq!(fired.load(AtomicOrdering::SeqCst), 3);
        assert_eq!(scheduler.pending(), 0);
    }
}

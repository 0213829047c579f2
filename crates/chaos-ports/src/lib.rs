//! A fixed range of ports, leased out for a duration and returned
//! automatically by a timer task. Free ports are kept on a stack so pop
//! order is deterministic LIFO, not the arbitrary order of a hash set.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct PortPool {
    free: Mutex<Vec<u16>>,
}

impl PortPool {
    /// Inclusive range `[start, end]`.
    pub fn new(start: u16, end: u16) -> Arc<Self> {
        let free: Vec<u16> = (start..=end).collect();
        Arc::new(Self {
            free: Mutex::new(free),
        })
    }

    /// Pops a free port and schedules its automatic return after
    /// `duration`. Returns `None` without blocking when the pool is
    /// exhausted.
    pub fn lease(self: &Arc<Self>, duration: Duration) -> Option<u16> {
        let port = self.free.lock().pop()?;
        let pool = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            pool.release(port);
        });
        Some(port)
    }

    pub fn release(&self, port: u16) {
        debug!(port, "returning port to pool");
        self.free.lock().push(port);
    }

    pub fn available(&self) -> usize {
        self.free.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_order_is_lifo() {
        let pool = PortPool::new(8000, 8001);
        assert_eq!(pool.lease(Duration::from_secs(10)), Some(8001));
        assert_eq!(pool.lease(Duration::from_secs(10)), Some(8000));
        assert_eq!(pool.lease(Duration::from_secs(10)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn lease_auto_returns_after_duration() {
        let pool = PortPool::new(9000, 9000);
        assert_eq!(pool.lease(Duration::from_secs(5)), Some(9000));
        assert_eq!(pool.available(), 0);
        tokio::time::advance(Duration::from_secs(6)).await;
        tokio::task::yield_now().await;
        assert_eq!(pool.available(), 1);
    }
}

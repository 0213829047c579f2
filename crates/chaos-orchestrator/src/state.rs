use crate::client::ApiClient;
use crate::logger::RequestLogger;
use crate::topology::OrchestratorTopology;
use chaos_locks::LinkLockTable;
use chaos_ports::PortPool;
use chaos_undo::UndoScheduler;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything a producer needs: the fetched topology, the lock table
/// keyed by the same ids the topology hands out, the port pool, the undo
/// scheduler, the API client and a process-wide shutdown flag.
pub struct OrchestratorState {
    pub topology: OrchestratorTopology,
    pub locks: LinkLockTable,
    pub ports: Arc<PortPool>,
    pub undo: Arc<UndoScheduler>,
    pub client: ApiClient,
    pub logger: Arc<RequestLogger>,
    shutdown: AtomicBool,
}

impl OrchestratorState {
    pub fn new(
        topology: OrchestratorTopology,
        ports: Arc<PortPool>,
        undo: Arc<UndoScheduler>,
        client: ApiClient,
        logger: Arc<RequestLogger>,
    ) -> Self {
        let locks = LinkLockTable::new();
        for link in &topology.directed {
            locks.register(link.id);
        }
        Self {
            topology,
            locks,
            ports,
            undo,
            client,
            logger,
            shutdown: AtomicBool::new(false),
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn raise_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RequestLogger;
    use crate::topology::OrchestratorTopology;
    use chaos_types::{DirectedLink, LinkId};
    use std::collections::HashMap;

    fn test_logger() -> Arc<RequestLogger> {
        let dir = std::env::temp_dir().join(format!("chaos-orch-state-test-{}", uuid::Uuid::new_v4()));
        Arc::new(RequestLogger::open(&dir).unwrap())
    }

    #[test]
    fn new_registers_a_lock_for_every_directed_link() {
        let topology = OrchestratorTopology {
            nodes: vec!["r1".to_string(), "r2".to_string()],
            directed: vec![
                DirectedLink::new(LinkId(0), "r1", "r2"),
                DirectedLink::new(LinkId(1), "r2", "r1"),
            ],
            router_ips: HashMap::new(),
            host_ips: HashMap::new(),
        };
        let logger = test_logger();
        let client = ApiClient::new("http://127.0.0.1:0", logger.clone());
        let state = OrchestratorState::new(
            topology,
            chaos_ports::PortPool::new(8000, 8005),
            chaos_undo::UndoScheduler::new(),
            client,
            logger,
        );

        assert!(state.locks.get(LinkId(0)).is_some());
        assert!(state.locks.get(LinkId(1)).is_some());
        assert_eq!(state.locks.len(), 2);
    }

    #[test]
    fn shutdown_flag_starts_false_and_latches_true() {
        let topology = OrchestratorTopology {
            nodes: vec!["r1".to_string()],
            directed: vec![],
            router_ips: HashMap::new(),
            host_ips: HashMap::new(),
        };
        let logger = test_logger();
        let client = ApiClient::new("http://127.0.0.1:0", logger.clone());
        let state = OrchestratorState::new(
            topology,
            chaos_ports::PortPool::new(8000, 8005),
            chaos_undo::UndoScheduler::new(),
            client,
            logger,
        );

        assert!(!state.is_shutting_down());
        state.raise_shutdown();
        assert!(state.is_shutting_down());
    }
}

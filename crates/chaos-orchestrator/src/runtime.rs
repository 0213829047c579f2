//! Startup and shutdown sequencing for the orchestrator binary.

use crate::client::ApiClient;
use crate::config::Cli;
use crate::error::ChaosResult;
use crate::logger::RequestLogger;
use crate::producers;
use crate::state::OrchestratorState;
use crate::topology::OrchestratorTopology;
use chaos_ports::PortPool;
use chaos_undo::UndoScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Average event duration in seconds contributed by each chaos event kind
/// to the combined driving rate; irreversible events contribute 0 since
/// they never occupy a link for a bounded window.
const CHAOS_EVENT_AVG_DURATIONS: [f64; 7] = [
    75.0, // bogus static route: undo in Uniform[30,120]
    0.0,  // ospf weight change: irreversible
    0.0,  // delay increase: irreversible
    17.5, // disconnect link: undo in Uniform[5,30]
    180.0, // disconnect router: undo in Uniform[60,300]
    20.0, // lossy link: undo in Uniform[10,30]
    0.0,  // bandwidth change: irreversible
];

fn chaos_rate() -> f64 {
    let mean = CHAOS_EVENT_AVG_DURATIONS.iter().sum::<f64>() / CHAOS_EVENT_AVG_DURATIONS.len() as f64;
    1.0 / mean
}

pub struct Orchestrator {
    pub state: Arc<OrchestratorState>,
    pub baseline_snapshot_id: String,
    tasks: Vec<JoinHandle<()>>,
    undo_consumer: JoinHandle<()>,
}

impl Orchestrator {
    pub async fn start(cli: &Cli) -> ChaosResult<Self> {
        let logger = Arc::new(RequestLogger::open(&cli.logs_dir)?);
        let client = ApiClient::new(cli.api_url.clone(), logger.clone());

        info!("fetching topology from control plane");
        let topology = OrchestratorTopology::fetch(&client).await?;
        info!(routers = topology.nodes.len(), links = topology.directed.len() / 2, "topology loaded");

        let baseline_snapshot_id = client.take_snapshot("startup").await?;
        info!(snapshot_id = %baseline_snapshot_id, "baseline snapshot captured");

        let ports = PortPool::new(cli.port_start, cli.port_end);
        let undo = UndoScheduler::new();

        let state = Arc::new(OrchestratorState::new(topology, ports, undo.clone(), client, logger));
        let undo_consumer = undo.spawn_consumer();

        let mut tasks = Vec::new();
        tasks.push(producers::background_traffic(state.clone(), cli.traffic_rate, cli.seed).await);
        tasks.push(producers::loss_dispatcher(state.clone(), cli.loss_rate, cli.seed.wrapping_add(1)).await);
        tasks.push(producers::delay_spike(state.clone(), cli.delay_rate, cli.seed.wrapping_add(2)).await);

        let per_kind_rate = chaos_rate() / CHAOS_EVENT_AVG_DURATIONS.len() as f64;
        tasks.push(producers::bogus_static_route(state.clone(), per_kind_rate, cli.seed.wrapping_add(10)).await);
        tasks.push(producers::ospf_weight_change(state.clone(), per_kind_rate, cli.seed.wrapping_add(11)).await);
        tasks.push(producers::delay_increase(state.clone(), per_kind_rate, cli.seed.wrapping_add(12)).await);
        tasks.push(producers::disconnect_link(state.clone(), per_kind_rate, cli.seed.wrapping_add(13)).await);
        tasks.push(producers::disconnect_router(state.clone(), per_kind_rate, cli.seed.wrapping_add(14)).await);
        tasks.push(producers::lossy_link(state.clone(), per_kind_rate, cli.seed.wrapping_add(15)).await);
        tasks.push(producers::bandwidth_change(state.clone(), per_kind_rate, cli.seed.wrapping_add(16)).await);

        info!(task_count = tasks.len(), "producers spawned");

        Ok(Self {
            state,
            baseline_snapshot_id,
            tasks,
            undo_consumer,
        })
    }

    /// Raises the shutdown flag, joins every producer with a bounded
    /// timeout, drains the undo queue, and restores the baseline.
    pub async fn shutdown(self) {
        info!("shutdown requested, stopping producers");
        self.state.raise_shutdown();

        for task in self.tasks {
            if tokio::time::timeout(Duration::from_secs(60), task).await.is_err() {
                tracing::warn!("producer task did not exit within 60s, abandoning it");
            }
        }

        self.state.undo.shutdown();
        if tokio::time::timeout(Duration::from_secs(60), self.undo_consumer).await.is_err() {
            tracing::warn!("undo scheduler did not drain within 60s");
        }

        if let Err(e) = self
            .state
            .client
            .apply_snapshot("shutdown", &self.baseline_snapshot_id)
            .await
        {
            tracing::warn!(error = %e, "failed to apply baseline snapshot during shutdown");
        }

        for link in &self.state.topology.directed {
            if let Err(e) = self
                .state
                .client
                .reset_link("shutdown", &link.src, &link.dst)
                .await
            {
                tracing::warn!(error = %e, src = %link.src, dst = %link.dst, "failed to reset link to baseline");
            }
        }

        info!("shutdown complete");
    }
}

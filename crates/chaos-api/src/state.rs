use crate::error::{ApiError, ApiResult};
use chaos_gateway::ContainerGateway;
use chaos_routing::{RoutingDriver, SnapshotStore};
use chaos_shaping::ShapingDriver;
use chaos_topology::TopologyModel;
use chaos_types::ShapingTuple;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

/// One packet capture in flight: the id handed back to the caller, the
/// filename tcpdump was told to write, and the container it runs in.
/// Tracked explicitly so stopping a capture never has to guess which
/// `.pcap` file on disk is the one it started.
pub struct ActiveCapture {
    pub id: String,
    pub filename: String,
    pub container: String,
}

pub struct AppState {
    pub topology: TopologyModel,
    pub shaping: ShapingDriver,
    pub routing: RoutingDriver,
    pub gateway: Arc<ContainerGateway>,
    pub snapshots: SnapshotStore,
    pub lab_prefix: String,
    pub logs_dir: PathBuf,
    iface_cache: DashMap<(String, String), String>,
    pub capture: Mutex<Option<ActiveCapture>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        topology: TopologyModel,
        gateway: Arc<ContainerGateway>,
        lab_prefix: String,
        logs_dir: PathBuf,
    ) -> Self {
        Self {
            topology,
            shaping: ShapingDriver::new(gateway.clone()),
            routing: RoutingDriver::new(gateway.clone()),
            gateway,
            snapshots: SnapshotStore::new(),
            lab_prefix,
            logs_dir,
            iface_cache: DashMap::new(),
            capture: Mutex::new(None),
        }
    }

    /// Container name for a node, matching the lab's naming convention:
    /// `<lab_prefix>_<node><router|host>`.
    pub fn container_name(&self, node: &str, nodetype: &str) -> ApiResult<String> {
        self.topology.node(node).map_err(ApiError::from)?;
        Ok(format!("{}_{}{}", self.lab_prefix, node, nodetype))
    }

    pub fn netflow_container(&self) -> String {
        format!("{}_netflow", self.lab_prefix)
    }

    pub async fn interface_toward(&self, src: &str, dst: &str) -> ApiResult<String> {
        let key = (src.to_string(), dst.to_string());
        if let Some(iface) = self.iface_cache.get(&key) {
            return Ok(iface.clone());
        }
        let dst_node = self.topology.node(dst)?;
        let src_container = self.container_name(src, "router")?;
        let iface = self
            .shaping
            .interface_toward(&src_container, &dst_node.ip)
            .await?;
        self.iface_cache.insert(key, iface.clone());
        Ok(iface)
    }

    pub async fn read_shaping(&self, src: &str, dst: &str) -> ApiResult<ShapingTuple> {
        let container = self.container_name(src, "router")?;
        let iface = self.interface_toward(src, dst).await?;
        let baseline = self.topology.baseline(src, dst)?;
        Ok(self.shaping.read(&container, &iface, baseline).await?)
    }

    pub async fn write_shaping(&self, src: &str, dst: &str, tuple: &ShapingTuple) -> ApiResult<()> {
        let container = self.container_name(src, "router")?;
        let iface = self.interface_toward(src, dst).await?;
        self.shaping.write(&container, &iface, tuple).await?;
        Ok(())
    }
}

//! Request/response bodies for the HTTP surface. Field names follow the
//! original control plane's JSON bodies so existing lab tooling and the
//! orchestrator's event producers don't need to change their payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LinkEndpointsQuery {
    pub src: String,
    pub dst: String,
}

#[derive(Debug, Deserialize)]
pub struct AddLossRequest {
    pub src: String,
    pub dst: String,
    pub loss_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddDelayRequest {
    pub src: String,
    pub dst: String,
    pub delay: f64,
}

#[derive(Debug, Deserialize)]
pub struct SetBandwidthRequest {
    pub src: String,
    pub dst: String,
    pub bandwidth: String,
}

#[derive(Debug, Deserialize)]
pub struct SetBufferRequest {
    pub src: String,
    pub dst: String,
    pub buffer: String,
}

#[derive(Debug, Deserialize)]
pub struct SetBurstRequest {
    pub src: String,
    pub dst: String,
    pub burst: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveChangeRequest {
    pub src: String,
    pub dst: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeOspfCostRequest {
    pub src: String,
    pub dst: String,
    pub cost: u32,
}

#[derive(Debug, Deserialize)]
pub struct StaticRouteRequest {
    pub node: String,
    pub destination: String,
    pub next_hop: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeFrrConfigRequest {
    pub node: String,
    pub config: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplySnapshotRequest {
    pub snapshot_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DisconnectContainerRequest {
    pub node: String,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub node: String,
    #[serde(default)]
    pub router: bool,
    pub cmd: String,
}

#[derive(Debug, Serialize)]
pub struct ShapingResponse {
    pub src: String,
    pub dst: String,
    pub loss: String,
    pub delay: String,
    pub bandwidth: String,
    pub burst: String,
    pub buffer: String,
}

impl ShapingResponse {
    pub fn new(src: &str, dst: &str, tuple: &chaos_types::ShapingTuple) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            loss: tuple.loss.clone(),
            delay: tuple.delay.clone(),
            bandwidth: tuple.bandwidth.clone(),
            burst: tuple.burst.clone(),
            buffer: tuple.buffer.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

#[derive(Debug, Serialize)]
pub struct OutputResponse {
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct DisconnectResponse {
    pub status: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct CaptureStartedResponse {
    pub capture_id: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct CaptureStoppedResponse {
    pub capture_id: String,
    pub local_path: String,
}

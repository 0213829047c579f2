use crate::dto::{ApplySnapshotRequest, SnapshotResponse, StatusResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use std::collections::HashMap;

pub async fn take_snapshot(State(state): State<SharedState>) -> ApiResult<Json<SnapshotResponse>> {
    let mut configs = HashMap::new();
    for router in state.topology.routers() {
        let container = state.container_name(&router.name, "router")?;
        let config = state.routing.read_running_config(&container).await?;
        configs.insert(router.name.clone(), config);
    }

    let snapshot = state.snapshots.take(configs);
    Ok(Json(SnapshotResponse {
        snapshot_id: snapshot.id,
        taken_at: snapshot.taken_at,
    }))
}

pub async fn apply_snapshot(
    State(state): State<SharedState>,
    Json(req): Json<ApplySnapshotRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let snapshot = state
        .snapshots
        .get(&req.snapshot_id)
        .ok_or_else(|| ApiError::UnknownSnapshot(req.snapshot_id.clone()))?;

    for (node, config) in &snapshot.configs {
        let container = state.container_name(node, "router")?;
        state.routing.apply_full_config(&container, config).await?;
    }
    Ok(Json(StatusResponse::ok()))
}

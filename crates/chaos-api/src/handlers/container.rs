use crate::dto::{DisconnectContainerRequest, DisconnectResponse, ExecuteRequest, OutputResponse};
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;

const BLOCK_ALL_TRAFFIC: &str = "iptables -A INPUT -j DROP && iptables -A OUTPUT -j DROP";
const UNBLOCK_ALL_TRAFFIC: &str = "iptables -D INPUT -j DROP && iptables -D OUTPUT -j DROP";

pub async fn disconnect_router(
    State(state): State<SharedState>,
    Json(req): Json<DisconnectContainerRequest>,
) -> ApiResult<Json<DisconnectResponse>> {
    let container = state.container_name(&req.node, "router")?;
    state.gateway.exec(&container, BLOCK_ALL_TRAFFIC).await?;
    Ok(Json(DisconnectResponse {
        status: "disconnected".to_string(),
        name: req.node,
        id: container,
    }))
}

pub async fn connect_router(
    State(state): State<SharedState>,
    Json(req): Json<DisconnectContainerRequest>,
) -> ApiResult<Json<DisconnectResponse>> {
    let container = state.container_name(&req.node, "router")?;
    state.gateway.exec(&container, UNBLOCK_ALL_TRAFFIC).await?;
    Ok(Json(DisconnectResponse {
        status: "connected".to_string(),
        name: req.node,
        id: container,
    }))
}

pub async fn execute(
    State(state): State<SharedState>,
    Json(req): Json<ExecuteRequest>,
) -> ApiResult<Json<OutputResponse>> {
    let nodetype = if req.router { "router" } else { "host" };
    let container = state.container_name(&req.node, nodetype)?;
    let out = state.gateway.exec(&container, &req.cmd).await?;
    Ok(Json(OutputResponse { output: out.stdout }))
}

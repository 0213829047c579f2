use crate::dto::{ChangeFrrConfigRequest, ChangeOspfCostRequest, OutputResponse, StaticRouteRequest, StatusResponse};
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::Json;

pub async fn change_ospf_cost(
    State(state): State<SharedState>,
    Json(req): Json<ChangeOspfCostRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let container = state.container_name(&req.src, "router")?;
    let iface = state.interface_toward(&req.src, &req.dst).await?;
    state.routing.change_ospf_cost(&container, &iface, req.cost).await?;
    Ok(Json(StatusResponse::ok()))
}

pub async fn add_static_route(
    State(state): State<SharedState>,
    Json(req): Json<StaticRouteRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let container = state.container_name(&req.node, "router")?;
    state
        .routing
        .add_static_route(&container, &req.destination, &req.next_hop)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

pub async fn remove_static_route(
    State(state): State<SharedState>,
    Json(req): Json<StaticRouteRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let container = state.container_name(&req.node, "router")?;
    state
        .routing
        .remove_static_route(&container, &req.destination, &req.next_hop)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

pub async fn get_running_config(
    State(state): State<SharedState>,
    Path(node): Path<String>,
) -> ApiResult<Json<OutputResponse>> {
    let container = state.container_name(&node, "router")?;
    let output = state.routing.read_running_config(&container).await?;
    Ok(Json(OutputResponse { output }))
}

pub async fn apply_full_config(
    State(state): State<SharedState>,
    Json(req): Json<ChangeFrrConfigRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let container = state.container_name(&req.node, "router")?;
    state.routing.apply_full_config(&container, &req.config).await?;
    Ok(Json(StatusResponse::ok()))
}

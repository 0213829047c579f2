use crate::dto::{
    AddDelayRequest, AddLossRequest, LinkEndpointsQuery, RemoveChangeRequest, SetBandwidthRequest,
    SetBufferRequest, SetBurstRequest, ShapingResponse,
};
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::Json;

pub async fn get_shaping(
    State(state): State<SharedState>,
    Query(q): Query<LinkEndpointsQuery>,
) -> ApiResult<Json<ShapingResponse>> {
    let tuple = state.read_shaping(&q.src, &q.dst).await?;
    Ok(Json(ShapingResponse::new(&q.src, &q.dst, &tuple)))
}

pub async fn add_loss(
    State(state): State<SharedState>,
    Json(req): Json<AddLossRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_loss(format!("{}%", req.loss_rate));
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

pub async fn add_delay(
    State(state): State<SharedState>,
    Json(req): Json<AddDelayRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_delay(format!("{}ms", req.delay));
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

pub async fn set_bandwidth(
    State(state): State<SharedState>,
    Json(req): Json<SetBandwidthRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_bandwidth(req.bandwidth);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

pub async fn set_buffer(
    State(state): State<SharedState>,
    Json(req): Json<SetBufferRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_buffer(req.buffer);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

pub async fn set_burst(
    State(state): State<SharedState>,
    Json(req): Json<SetBurstRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_burst(req.burst);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

/// Resets a link to the baseline values recorded when the topology was loaded.
pub async fn remove_change(
    State(state): State<SharedState>,
    Json(req): Json<RemoveChangeRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let baseline = state.topology.baseline(&req.src, &req.dst)?.clone();
    state.write_shaping(&req.src, &req.dst, &baseline).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &baseline)))
}

/// Replaces only the bandwidth field with its baseline value, preserving
/// whatever the other four fields are currently set to.
pub async fn reset_bandwidth(
    State(state): State<SharedState>,
    Json(req): Json<RemoveChangeRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let baseline = state.topology.baseline(&req.src, &req.dst)?.clone();
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_bandwidth(baseline.bandwidth);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

/// Replaces only the buffer field with its baseline value, preserving
/// whatever the other four fields are currently set to.
pub async fn reset_buffer(
    State(state): State<SharedState>,
    Json(req): Json<RemoveChangeRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let baseline = state.topology.baseline(&req.src, &req.dst)?.clone();
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_buffer(baseline.buffer);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

/// Replaces only the burst field with its baseline value, preserving
/// whatever the other four fields are currently set to.
pub async fn reset_burst(
    State(state): State<SharedState>,
    Json(req): Json<RemoveChangeRequest>,
) -> ApiResult<Json<ShapingResponse>> {
    let baseline = state.topology.baseline(&req.src, &req.dst)?.clone();
    let current = state.read_shaping(&req.src, &req.dst).await?;
    let updated = current.with_burst(baseline.burst);
    state.write_shaping(&req.src, &req.dst, &updated).await?;
    Ok(Json(ShapingResponse::new(&req.src, &req.dst, &updated)))
}

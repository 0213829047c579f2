use crate::error::ApiResult;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
pub struct RoutersResponse {
    routers: Vec<String>,
}

pub async fn available_routers(State(state): State<SharedState>) -> ApiResult<Json<RoutersResponse>> {
    let routers = state.topology.routers().map(|n| n.name.clone()).collect();
    Ok(Json(RoutersResponse { routers }))
}

#[derive(Serialize)]
pub struct LinkEntry {
    src: String,
    dst: String,
    details: chaos_types::ShapingTuple,
}

#[derive(Serialize)]
pub struct LinksResponse {
    links: Vec<LinkEntry>,
}

pub async fn links(State(state): State<SharedState>) -> ApiResult<Json<LinksResponse>> {
    let mut links = Vec::with_capacity(state.topology.directed_links().len());
    for l in state.topology.directed_links() {
        let details = state.topology.baseline(&l.src, &l.dst)?.clone();
        links.push(LinkEntry {
            src: l.src.clone(),
            dst: l.dst.clone(),
            details,
        });
    }
    Ok(Json(LinksResponse { links }))
}

#[derive(Serialize)]
pub struct IpsResponse {
    ips: HashMap<String, String>,
}

pub async fn router_ips(State(state): State<SharedState>) -> ApiResult<Json<IpsResponse>> {
    let ips = state
        .topology
        .routers()
        .map(|n| (n.name.clone(), n.ip.clone()))
        .collect();
    Ok(Json(IpsResponse { ips }))
}

pub async fn host_ips(State(state): State<SharedState>) -> ApiResult<Json<IpsResponse>> {
    let ips = state
        .topology
        .directed_links()
        .iter()
        .flat_map(|l| [&l.src, &l.dst])
        .filter_map(|name| state.topology.node(name).ok().map(|n| (n, name)))
        .filter(|(n, _)| !n.is_router())
        .map(|(n, name)| (name.clone(), n.ip.clone()))
        .collect();
    Ok(Json(IpsResponse { ips }))
}

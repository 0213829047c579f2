use crate::state::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn live() -> Json<serde_json::Value> {
    Json(json!({ "status": "alive" }))
}

/// Ready only once at least one router container actually answers a shell command.
pub async fn ready(State(state): State<SharedState>) -> (StatusCode, Json<serde_json::Value>) {
    let Some(router) = state.topology.routers().next() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready", "reason": "no routers in topology" })),
        );
    };
    let Ok(container) = state.container_name(&router.name, "router") else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready" })),
        );
    };
    match state.gateway.exec(&container, "true").await {
        Ok(out) if out.success() => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready", "reason": "router container unreachable" })),
        ),
    }
}

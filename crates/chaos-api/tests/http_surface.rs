use axum::body::Body;
use axum::http::{Request, StatusCode};
use chaos_api::state::AppState;
use chaos_gateway::ContainerGateway;
use chaos_topology::TopologyModel;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

fn test_topology() -> TopologyModel {
    let row = chaos_topology::LinkRow {
        host1: "r1".to_string(),
        host2: "r2".to_string(),
        bandwidth: "10mbit".to_string(),
        delay: "10ms".to_string(),
        buffer: "50ms".to_string(),
        loss: "0%".to_string(),
        burst: "125000".to_string(),
    };
    TopologyModel::from_parts(
        vec!["r1".to_string(), "r2".to_string()],
        vec![row],
        &HashMap::new(),
        &HashMap::new(),
    )
}

fn test_state() -> Arc<AppState> {
    let gateway = Arc::new(ContainerGateway::new());
    Arc::new(AppState::new(
        test_topology(),
        gateway,
        "lab".to_string(),
        std::env::temp_dir(),
    ))
}

#[tokio::test]
async fn link_state_rejects_unknown_node_with_404() {
    let app = chaos_api::router(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/link_state?src=ghost&dst=r2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn available_routers_lists_both_routers() {
    let app = chaos_api::router(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/available_routers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let routers = json["routers"].as_array().unwrap();
    assert_eq!(routers.len(), 2);
}

#[tokio::test]
async fn health_is_always_ok() {
    let app = chaos_api::router(test_state());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn links_reports_baseline_details_per_direction() {
    let app = chaos_api::router(test_state());
    let response = app
        .oneshot(Request::builder().uri("/links").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2, "one undirected link yields both directions");
    for link in links {
        assert_eq!(link["details"]["bandwidth"], "10mbit");
        assert_eq!(link["details"]["delay"], "10ms");
        assert_eq!(link["details"]["loss"], "0%");
    }
}

#[tokio::test]
async fn apply_snapshot_rejects_unknown_id_with_404() {
    let app = chaos_api::router(test_state());
    let body = serde_json::json!({ "snapshot_id": "doesnotexist" }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/apply_snapshot")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

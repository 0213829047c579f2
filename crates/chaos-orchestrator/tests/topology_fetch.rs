//! Exercises `OrchestratorTopology::fetch` against a small axum stand-in
//! for the control plane, the same way `chaos-api`'s own tests exercise
//! its router in isolation — here the "server under test" is the other
//! side of the wire rather than the crate itself.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chaos_orchestrator::client::ApiClient;
use chaos_orchestrator::logger::RequestLogger;
use chaos_orchestrator::topology::OrchestratorTopology;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Fixture {
    routers: Vec<&'static str>,
    links: Vec<(&'static str, &'static str)>,
    router_ips: HashMap<&'static str, &'static str>,
    host_ips: HashMap<&'static str, &'static str>,
}

async fn available_routers(State(fx): State<Fixture>) -> Json<Value> {
    Json(json!({ "routers": fx.routers }))
}

async fn links(State(fx): State<Fixture>) -> Json<Value> {
    let links: Vec<Value> = fx
        .links
        .iter()
        .map(|(src, dst)| json!({ "src": src, "dst": dst }))
        .collect();
    Json(json!({ "links": links }))
}

async fn router_ips(State(fx): State<Fixture>) -> Json<Value> {
    Json(json!({ "ips": fx.router_ips }))
}

async fn host_ips(State(fx): State<Fixture>) -> Json<Value> {
    Json(json!({ "ips": fx.host_ips }))
}

async fn spawn_fixture_server(fixture: Fixture) -> String {
    let router = Router::new()
        .route("/available_routers", get(available_routers))
        .route("/links", get(links))
        .route("/router_ips", get(router_ips))
        .route("/host_ips", get(host_ips))
        .with_state(fixture);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_logger() -> Arc<RequestLogger> {
    let dir = std::env::temp_dir().join(format!("chaos-orch-test-{}", uuid::Uuid::new_v4()));
    Arc::new(RequestLogger::open(&dir).unwrap())
}

fn two_router_fixture() -> Fixture {
    Fixture {
        routers: vec!["r1", "r2"],
        links: vec![("r1", "r2")],
        router_ips: HashMap::from([("r1", "10.0.0.1"), ("r2", "10.0.0.2")]),
        host_ips: HashMap::from([("h1", "10.0.1.1"), ("h2", "10.0.1.2")]),
    }
}

#[tokio::test]
async fn fetch_builds_both_directions_of_every_link() {
    let base_url = spawn_fixture_server(two_router_fixture()).await;
    let client = ApiClient::new(base_url, test_logger());

    let topology = OrchestratorTopology::fetch(&client).await.unwrap();

    assert_eq!(topology.nodes, vec!["r1", "r2"]);
    assert_eq!(topology.directed.len(), 2, "one undirected link becomes two directed links");
    let pairs: Vec<(&str, &str)> = topology
        .directed
        .iter()
        .map(|l| (l.src.as_str(), l.dst.as_str()))
        .collect();
    assert!(pairs.contains(&("r1", "r2")));
    assert!(pairs.contains(&("r2", "r1")));
}

#[tokio::test]
async fn fetch_assigns_distinct_link_ids_to_each_direction() {
    let base_url = spawn_fixture_server(two_router_fixture()).await;
    let client = ApiClient::new(base_url, test_logger());

    let topology = OrchestratorTopology::fetch(&client).await.unwrap();

    assert_ne!(topology.directed[0].id, topology.directed[1].id);
}

#[tokio::test]
async fn fetch_rejects_empty_router_list() {
    let empty = Fixture {
        routers: vec![],
        ..two_router_fixture()
    };
    let base_url = spawn_fixture_server(empty).await;
    let client = ApiClient::new(base_url, test_logger());

    let err = OrchestratorTopology::fetch(&client).await.unwrap_err();
    assert!(matches!(err, chaos_orchestrator::ChaosError::EmptyConfiguration("routers")));
}

#[tokio::test]
async fn fetch_rejects_empty_link_list() {
    let empty = Fixture {
        links: vec![],
        ..two_router_fixture()
    };
    let base_url = spawn_fixture_server(empty).await;
    let client = ApiClient::new(base_url, test_logger());

    let err = OrchestratorTopology::fetch(&client).await.unwrap_err();
    assert!(matches!(err, chaos_orchestrator::ChaosError::EmptyConfiguration("links")));
}

pub mod capture;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ips;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/add_loss", post(handlers::shaping::add_loss))
        .route("/add_delay", post(handlers::shaping::add_delay))
        .route("/set_bandwidth", post(handlers::shaping::set_bandwidth))
        .route("/set_buffer", post(handlers::shaping::set_buffer))
        .route("/set_burst", post(handlers::shaping::set_burst))
        .route("/reset_link", post(handlers::shaping::remove_change))
        .route("/reset_bandwidth", post(handlers::shaping::reset_bandwidth))
        .route("/reset_buffer", post(handlers::shaping::reset_buffer))
        .route("/reset_burst", post(handlers::shaping::reset_burst))
        .route("/link_state", get(handlers::shaping::get_shaping))
        .route("/change_ospf_cost", post(handlers::routing::change_ospf_cost))
        .route("/add_static_route", post(handlers::routing::add_static_route))
        .route("/remove_static_route", post(handlers::routing::remove_static_route))
        .route("/running_config/:node", get(handlers::routing::get_running_config))
        .route("/change_frr_config", post(handlers::routing::apply_full_config))
        .route("/disconnect_router", post(handlers::container::disconnect_router))
        .route("/connect_router", post(handlers::container::connect_router))
        .route("/execute", post(handlers::container::execute))
        .route("/take_snapshot", post(handlers::snapshot::take_snapshot))
        .route("/apply_snapshot", post(handlers::snapshot::apply_snapshot))
        .route("/available_routers", get(handlers::topology::available_routers))
        .route("/links", get(handlers::topology::links))
        .route("/router_ips", get(handlers::topology::router_ips))
        .route("/host_ips", get(handlers::topology::host_ips))
        .route("/start_collection", post(handlers::pcap::start_collection))
        .route("/stop_collection", post(handlers::pcap::stop_collection))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        .with_state(state)
}

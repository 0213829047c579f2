use chaos_api::config::Config;
use chaos_api::ips::IpAssignments;
use chaos_api::state::AppState;
use chaos_gateway::ContainerGateway;
use chaos_topology::TopologyModel;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt().with_env_filter(env_filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    info!(listen_addr = %config.listen_addr, lab = %config.lab_name, "starting control plane");

    let ips = IpAssignments::load(&config.labs_dir, &config.lab_name)?;
    let topology = TopologyModel::load(
        &config.labs_dir,
        &config.lab_name,
        &config.selected_as,
        &ips.routers,
        &ips.hosts,
    )?;

    std::fs::create_dir_all(&config.logs_dir)?;

    let gateway = Arc::new(ContainerGateway::with_runtime_binary(config.runtime_bin.clone()));
    let state = Arc::new(AppState::new(
        topology,
        gateway,
        config.lab_prefix.clone(),
        config.logs_dir.clone(),
    ));

    let app = chaos_api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    match axum::serve(listener, app).await {
        Ok(()) => {
            info!("control plane stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "control plane server error");
            Err(Box::new(e))
        }
    }
}

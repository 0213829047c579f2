use chaos_orchestrator::config::Cli;
use chaos_orchestrator::Orchestrator;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!(api_url = %cli.api_url, seed = cli.seed, "starting chaos orchestrator");

    let orchestrator = match Orchestrator::start(&cli).await {
        Ok(o) => o,
        Err(e) => {
            error!(error = %e, "failed to start orchestrator");
            return Err(Box::new(e));
        }
    };

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("received interrupt");
        }
        _ = sigterm.recv() => {
            info!("received terminate signal");
        }
    }

    orchestrator.shutdown().await;
    Ok(())
}

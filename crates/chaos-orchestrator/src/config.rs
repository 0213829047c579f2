use clap::Parser;

/// Orchestrator flags. Each has an environment fallback so the binary can
/// be driven purely from a compose file as well as from the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "chaos-orchestrator", about = "Fault-injection driver for the emulated lab")]
pub struct Cli {
    /// Base URL of the control plane, e.g. `http://localhost:8080`.
    #[arg(long, env = "CHAOS_ORCH_API_URL")]
    pub api_url: String,

    /// Seed shared by every producer's RNG, for reproducible runs.
    #[arg(long, env = "CHAOS_ORCH_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Mean seconds between loss events (ElementaryLoss/ComplexLoss dispatch).
    #[arg(long, env = "CHAOS_ORCH_LOSS_RATE", default_value_t = 20.0)]
    pub loss_rate: f64,

    /// Mean seconds between delay-spike events.
    #[arg(long, env = "CHAOS_ORCH_DELAY_RATE", default_value_t = 30.0)]
    pub delay_rate: f64,

    /// Mean seconds between background-traffic events.
    #[arg(long, env = "CHAOS_ORCH_TRAFFIC_RATE", default_value_t = 35.0)]
    pub traffic_rate: f64,

    /// First port of the leasable range for background traffic.
    #[arg(long, env = "CHAOS_ORCH_PORT_START", default_value_t = 8000)]
    pub port_start: u16,

    /// Last port (inclusive) of the leasable range.
    #[arg(long, env = "CHAOS_ORCH_PORT_END", default_value_t = 8005)]
    pub port_end: u16,

    /// Directory the structured request log is written to.
    #[arg(long, env = "CHAOS_ORCH_LOGS_DIR", default_value = "./logs")]
    pub logs_dir: std::path::PathBuf,
}

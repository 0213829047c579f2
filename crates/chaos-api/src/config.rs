use clap::Parser;
use std::path::PathBuf;

/// Control plane settings, resolved from CLI flags with environment
/// variable fallbacks (`CHAOS_API_*`) and hardcoded defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "chaos-api", about = "Control plane for the emulated lab network")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "CHAOS_API_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Directory holding per-lab topology files (`<lab>/AS_config.txt`, routers, links).
    #[arg(long, env = "CHAOS_API_LABS_DIR", default_value = "/labs")]
    pub labs_dir: PathBuf,

    /// Lab to load on startup.
    #[arg(long, env = "CHAOS_API_LAB_NAME")]
    pub lab_name: String,

    /// Autonomous system selected within the lab.
    #[arg(long, env = "CHAOS_API_SELECTED_AS")]
    pub selected_as: String,

    /// Prefix container names share, e.g. `<lab_prefix>_r1router`.
    #[arg(long, env = "CHAOS_API_LAB_PREFIX")]
    pub lab_prefix: String,

    /// Directory packet captures and other artifacts are written to on the host.
    #[arg(long, env = "CHAOS_API_LOGS_DIR", default_value = "/var/log/chaos-api")]
    pub logs_dir: PathBuf,

    /// Container runtime binary used for exec/cp.
    #[arg(long, env = "CHAOS_API_RUNTIME_BIN", default_value = "docker")]
    pub runtime_bin: String,

    /// Emit logs as JSON lines instead of the default human-readable format.
    #[arg(long, env = "CHAOS_API_JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::parse()
    }
}

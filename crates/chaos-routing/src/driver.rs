use crate::error::{RoutingError, RoutingResult};
use chaos_gateway::ContainerGateway;
use std::sync::Arc;
use tracing::instrument;

const EXCLUDED_LINES: &[&str] = &["Building configuration...", "Current configuration:", "!", "end"];

/// Strips the separators and headers FRR writes into its human-readable
/// config file but won't accept back through its reload API.
pub fn clean_frr_config(frr_config: &str) -> String {
    frr_config
        .lines()
        .filter(|line| !EXCLUDED_LINES.contains(&line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct RoutingDriver {
    gateway: Arc<ContainerGateway>,
}

impl RoutingDriver {
    pub fn new(gateway: Arc<ContainerGateway>) -> Self {
        Self { gateway }
    }

    /// Enters vtysh with one `-c` flag per directive. No parsing of the
    /// directive set is attempted; callers are responsible for valid
    /// vtysh syntax.
    #[instrument(skip(self, directives))]
    pub async fn apply_directives(&self, node: &str, directives: &[String]) -> RoutingResult<()> {
        let mut cmd = String::from("vtysh");
        for directive in directives {
            cmd.push_str(&format!(" -c \"{directive}\""));
        }
        let out = self.gateway.exec(node, &cmd).await?;
        if !out.success() {
            return Err(RoutingError::CommandFailed {
                stderr: out.stdout,
                exit_code: out.exit_code,
            });
        }
        Ok(())
    }

    pub async fn change_ospf_cost(&self, node: &str, iface: &str, cost: u32) -> RoutingResult<()> {
        self.apply_directives(
            node,
            &[
                "configure terminal".to_string(),
                format!("interface {iface}"),
                format!("ip ospf cost {cost}"),
                "exit".to_string(),
                "exit".to_string(),
                "write memory".to_string(),
            ],
        )
        .await
    }

    pub async fn add_static_route(&self, node: &str, destination: &str, next_hop: &str) -> RoutingResult<()> {
        self.apply_directives(
            node,
            &[
                "configure terminal".to_string(),
                format!("ip route {destination} {next_hop}"),
                "end".to_string(),
                "write memory".to_string(),
            ],
        )
        .await
    }

    pub async fn remove_static_route(&self, node: &str, destination: &str, next_hop: &str) -> RoutingResult<()> {
        self.apply_directives(
            node,
            &[
                "configure terminal".to_string(),
                format!("no ip route {destination} {next_hop}"),
                "end".to_string(),
                "write memory".to_string(),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn read_running_config(&self, node: &str) -> RoutingResult<String> {
        let out = self.gateway.exec(node, "vtysh -c \"show run\"").await?;
        if !out.success() {
            return Err(RoutingError::CommandFailed {
                stderr: out.stderr,
                exit_code: out.exit_code,
            });
        }
        Ok(out.stdout)
    }

    /// Replaces the whole running config. FRR has no API to reload its
    /// config from disk; the reload script is the only documented way
    /// to push a full config short of restarting the daemon.
    #[instrument(skip(self, frr_config))]
    pub async fn apply_full_config(&self, node: &str, frr_config: &str) -> RoutingResult<()> {
        let cleaned = clean_frr_config(frr_config);
        let cmd = format!(
            "sh -c 'echo \"{cleaned}\" > /etc/frr/frr_new.conf && /usr/lib/frr/frr-reload.py --reload /etc/frr/frr_new.conf && rm /etc/frr/frr_new.conf'"
        );
        let out = self.gateway.exec_tty(node, &cmd).await?;
        if !out.success() {
            return Err(RoutingError::CommandFailed {
                stderr: out.stderr,
                exit_code: out.exit_code,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_frr_config_strips_separators() {
        let raw = "Building configuration...\n\
                    Current configuration:\n\
                    !\n\
                    hostname r1\n\
                    !\n\
                    end";
        assert_eq!(clean_frr_config(raw), "hostname r1");
    }
}

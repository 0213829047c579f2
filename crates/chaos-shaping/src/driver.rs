use crate::error::{ShapingError, ShapingResult};
use crate::parse::parse_tc_show;
use chaos_gateway::ContainerGateway;
use chaos_types::ShapingTuple;
use std::sync::Arc;
use tracing::instrument;

/// Applies and reads back shaping tuples by shelling `tc` commands into
/// the source container of a directed link.
pub struct ShapingDriver {
    gateway: Arc<ContainerGateway>,
}

impl ShapingDriver {
    pub fn new(gateway: Arc<ContainerGateway>) -> Self {
        Self { gateway }
    }

    /// Resolves the egress interface `src_container` would use to reach
    /// `dst_ip`, by asking its own routing table. The interface name is
    /// the fifth whitespace-separated token of `ip -o route get`'s output.
    #[instrument(skip(self))]
    pub async fn interface_toward(&self, src_container: &str, dst_ip: &str) -> ShapingResult<String> {
        let cmd = format!("ip -o route get {dst_ip}");
        let out = self.gateway.exec(src_container, &cmd).await?;
        out.stdout
            .split_whitespace()
            .nth(4)
            .map(str::to_string)
            .ok_or_else(|| ShapingError::InterfaceNotFound(dst_ip.to_string()))
    }

    #[instrument(skip(self, baseline))]
    pub async fn read(
        &self,
        container: &str,
        iface: &str,
        baseline: &ShapingTuple,
    ) -> ShapingResult<ShapingTuple> {
        let out = self
            .gateway
            .exec(container, &format!("tc qdisc show dev {iface}"))
            .await?;
        Ok(parse_tc_show(&out.stdout, baseline))
    }

    /// Replaces the whole shaping configuration on `iface` with `tuple`:
    /// delete any existing root qdisc (tolerating "no such qdisc" when
    /// none is installed yet), install netem for delay/loss, then tbf for
    /// bandwidth/burst/buffer.
    #[instrument(skip(self, tuple))]
    pub async fn write(
        &self,
        container: &str,
        iface: &str,
        tuple: &ShapingTuple,
    ) -> ShapingResult<()> {
        let cmd = format!(
            "tc qdisc del dev {iface} root || true; \
             tc qdisc add dev {iface} root handle 1:0 netem delay {delay} loss {loss}; \
             tc qdisc add dev {iface} parent 1:1 handle 10: tbf rate {bandwidth} burst {burst} latency {buffer}",
            iface = iface,
            delay = tuple.delay,
            loss = tuple.loss,
            bandwidth = tuple.bandwidth,
            burst = tuple.burst,
            buffer = tuple.buffer,
        );
        let out = self.gateway.exec(container, &cmd).await?;
        if !out.success() {
            return Err(ShapingError::CommandFailed {
                stderr: out.stderr,
                exit_code: out.exit_code,
            });
        }
        Ok(())
    }

    pub async fn reset(
        &self,
        container: &str,
        iface: &str,
        baseline: &ShapingTuple,
    ) -> ShapingResult<()> {
        self.write(container, iface, baseline).await
    }
}

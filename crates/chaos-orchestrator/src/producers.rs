//! Independent cooperative producers, one task each, all reading from the
//! shared `OrchestratorState`. Every producer owns its own RNG instance
//! (seeded from the shared seed, so a run is reproducible) and polls the
//! shutdown flag at least once a second via `sleep_interruptible`.

use crate::state::OrchestratorState;
use chaos_types::DirectedLink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Sleeps `duration`, checking the shutdown flag at least once a second.
/// Returns `false` if shutdown was observed before the sleep completed.
async fn sleep_interruptible(state: &OrchestratorState, duration: Duration) -> bool {
    let mut remaining = duration;
    loop {
        if state.is_shutting_down() {
            return false;
        }
        let step = remaining.min(POLL_INTERVAL);
        tokio::time::sleep(step).await;
        remaining = remaining.saturating_sub(step);
        if remaining.is_zero() {
            return !state.is_shutting_down();
        }
    }
}

fn sample_exponential(rng: &mut StdRng, rate: f64) -> Duration {
    let u: f64 = rng.gen_range(f64::EPSILON..1.0);
    Duration::from_secs_f64(-u.ln() / rate)
}

fn random_link(state: &OrchestratorState, rng: &mut StdRng) -> DirectedLink {
    state.topology.random_link(rng).clone()
}

/// Flips a fair coin between web and videostreaming traffic, leases a
/// port for `duration + 1s`, and fires a detached flowgrind invocation on
/// a random server against 1..=3 random clients. Skips the iteration
/// outright when the port pool is exhausted (S4).
pub async fn background_traffic(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, 1.0 / rate)).await {
                return;
            }

            let (server, clients) = state.topology.random_server_and_clients(&mut rng);
            let duration = rng.gen_range(10..=60u64);
            let Some(port) = state.ports.lease(Duration::from_secs(duration + 1)) else {
                let e = crate::error::ChaosError::ResourceExhausted;
                info!(error = %e, "skipping background traffic iteration");
                continue;
            };

            let is_video = rng.gen_bool(0.5);
            let flow_seed: u32 = rng.gen_range(0..10_000);
            let cmd = build_traffic_cmd(&state, &server, &clients, duration, port, flow_seed, is_video);

            if let Err(e) = state.client.execute("background_traffic", &server, false, &cmd).await {
                warn!(error = %e, "background traffic execute failed");
            }
        }
    })
}

/// Mirrors `gen_webserver_traffic_cmd`/`gen_videostreaming_traffic_cmd`:
/// one `-F <flow> -J <seed> -H s=.../d=... -T s=<duration>` segment per
/// client, with distinct `-G` shaping parameters per traffic kind.
fn build_traffic_cmd(
    state: &OrchestratorState,
    server: &str,
    clients: &[String],
    duration: u64,
    port: u16,
    seed: u32,
    is_video: bool,
) -> String {
    let server_ip = state.topology.host_ip(server).unwrap_or(server);
    let mut cmd = format!("flowgrind -n {}", clients.len());
    for (flow_id, client) in clients.iter().enumerate() {
        let client_ip = state.topology.host_ip(client).unwrap_or(client);
        cmd.push_str(&format!(
            " -F {flow_id} -J {seed} -H s={server_ip}/{server_ip}:{port},d={client_ip}/{client_ip}:{port} -T s={duration}"
        ));
        if is_video {
            cmd.push_str(" -G s=q:C:800 -G s=g:N:0.008:0.001");
        } else {
            cmd.push_str(" -G s=q:C:350 -G s=p:L:9055:115.17 -U b=100000");
        }
    }
    cmd
}

async fn elementary_loss(state: &Arc<OrchestratorState>, link: &DirectedLink) {
    let locks = state.locks.get(link.id).expect("every link is registered at startup");
    let _guard = locks.enter_modify().await;

    let current = match state.client.link_state("loss", &link.src, &link.dst).await {
        Ok(tuple) => tuple,
        Err(e) => {
            warn!(error = %e, "could not read link state for elementary loss");
            return;
        }
    };

    if let Err(e) = state.client.add_loss("loss", &link.src, &link.dst, 100.0).await {
        warn!(error = %e, "failed to apply elementary loss pulse");
        return;
    }
    let restore: f64 = current.loss.trim_end_matches('%').parse().unwrap_or(0.0);
    if let Err(e) = state.client.add_loss("loss", &link.src, &link.dst, restore).await {
        warn!(error = %e, "failed to restore loss after elementary pulse");
    }
}

async fn complex_loss(state: &Arc<OrchestratorState>, link: &DirectedLink, rng: &mut StdRng) {
    let total = Duration::from_secs(rng.gen_range(20..=50));
    let mut remaining = total;
    while !remaining.is_zero() && !state.is_shutting_down() {
        let started = std::time::Instant::now();
        elementary_loss(state, link).await;
        let gap = sample_exponential(rng, 1.0 / 5.0);
        if !sleep_interruptible(state, gap).await {
            return;
        }
        remaining = remaining.saturating_sub(started.elapsed());
    }
}

/// 10% probability fires `complex_loss` on the chosen link; otherwise a
/// single `elementary_loss` pulse.
pub async fn loss_dispatcher(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, 1.0 / rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            if rng.gen_bool(0.1) {
                complex_loss(&state, &link, &mut rng).await;
            } else {
                elementary_loss(&state, &link).await;
            }
        }
    })
}

pub async fn delay_spike(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, 1.0 / rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            let locks = state.locks.get(link.id).expect("every link is registered at startup");
            let _guard = locks.enter_modify().await;

            let current = match state.client.link_state("delay_spike", &link.src, &link.dst).await {
                Ok(tuple) => tuple,
                Err(e) => {
                    warn!(error = %e, "could not read link state for delay spike");
                    continue;
                }
            };
            let baseline_ms: u64 = current
                .delay
                .trim_end_matches("ms")
                .trim_end_matches('s')
                .parse()
                .unwrap_or(5);
            let spike_ms = rng.gen_range(30..=240);
            if let Err(e) = state.client.add_delay("delay_spike", &link.src, &link.dst, spike_ms as f64).await {
                warn!(error = %e, "failed to apply delay spike");
                continue;
            }
            if let Err(e) = state
                .client
                .add_delay("delay_spike", &link.src, &link.dst, baseline_ms as f64)
                .await
            {
                warn!(error = %e, "failed to restore delay after spike");
            }
        }
    })
}

/// Picks a /16 or /24 subnet off a random node's host IP and installs a
/// bogus static route toward it from a random target, undoing it after a
/// random delay.
pub async fn bogus_static_route(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            if state.topology.nodes.len() < 3 {
                continue;
            }
            let target = state.topology.random_node(&mut rng).to_string();
            let dest_node = state.topology.random_node(&mut rng).to_string();
            let next_hop_node = state.topology.random_node(&mut rng).to_string();
            let Some(dest_ip) = state
                .topology
                .host_ips
                .get(&dest_node)
                .or_else(|| state.topology.router_ips.get(&dest_node))
            else {
                continue;
            };
            let Some(next_hop_ip) = state
                .topology
                .host_ips
                .get(&next_hop_node)
                .or_else(|| state.topology.router_ips.get(&next_hop_node))
            else {
                continue;
            };
            let prefix = if rng.gen_bool(0.5) { 16 } else { 24 };
            let destination = mask_to_subnet(dest_ip, prefix);

            if let Err(e) = state
                .client
                .add_static_route("bogus_static_route", &target, &destination, next_hop_ip)
                .await
            {
                warn!(error = %e, "failed to install bogus static route");
                continue;
            }

            let deadline_secs = rng.gen_range(30..=120);
            let client = state.client.clone();
            let target = target.clone();
            let destination = destination.clone();
            let next_hop = next_hop_ip.clone();
            state.undo.enqueue_in(
                Duration::from_secs(deadline_secs),
                Box::pin(async move {
                    if let Err(e) = client
                        .remove_static_route("undo:bogus_static_route", &target, &destination, &next_hop)
                        .await
                    {
                        warn!(error = %e, "failed to undo bogus static route");
                    }
                }),
            );
        }
    })
}

fn mask_to_subnet(ip: &str, prefix: u8) -> String {
    let octets: Vec<u8> = ip.split('.').filter_map(|o| o.parse().ok()).collect();
    if octets.len() != 4 {
        return format!("{ip}/{prefix}");
    }
    let masked = match prefix {
        16 => [octets[0], octets[1], 0, 0],
        24 => [octets[0], octets[1], octets[2], 0],
        _ => [octets[0], octets[1], octets[2], octets[3]],
    };
    format!("{}.{}.{}.{}/{}", masked[0], masked[1], masked[2], masked[3], prefix)
}

/// Irreversible: sets a random OSPF cost on a random link.
pub async fn ospf_weight_change(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            let cost = rng.gen_range(1..=100u32);
            if let Err(e) = state.client.change_ospf_cost("ospf_weight_change", &link.src, &link.dst, cost).await {
                warn!(error = %e, "failed to change ospf cost");
            }
        }
    })
}

/// Irreversible: raises delay on a random link under `modify`.
pub async fn delay_increase(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            let locks = state.locks.get(link.id).expect("every link is registered at startup");
            let _guard = locks.enter_modify().await;
            let delay = rng.gen_range(2..=300);
            if let Err(e) = state.client.add_delay("delay_increase", &link.src, &link.dst, delay as f64).await {
                warn!(error = %e, "failed to increase delay");
            }
        }
    })
}

async fn disconnect_link_like(state: &Arc<OrchestratorState>, link: &DirectedLink, loss: f64, undo_range: (u64, u64)) {
    let locks = state.locks.get(link.id).expect("every link is registered at startup");
    if !locks.try_acquire_in_use() {
        return;
    }

    let current = match state.client.link_state("disconnect_link", &link.src, &link.dst).await {
        Ok(tuple) => tuple,
        Err(e) => {
            warn!(error = %e, "could not read link state before disconnect");
            locks.release_in_use();
            return;
        }
    };
    let restore: f64 = current.loss.trim_end_matches('%').parse().unwrap_or(0.0);

    {
        let guard = locks.enter_modify().await;
        if let Err(e) = state.client.add_loss("disconnect_link", &link.src, &link.dst, loss).await {
            warn!(error = %e, "failed to apply link disconnect loss");
            drop(guard);
            locks.release_in_use();
            return;
        }
    }

    let mut rng = rand::thread_rng();
    let deadline = rng.gen_range(undo_range.0..=undo_range.1);
    let src = link.src.clone();
    let dst = link.dst.clone();
    let client = state.client.clone();
    let locks = locks.clone();
    state.undo.enqueue_in(
        Duration::from_secs(deadline),
        Box::pin(async move {
            let guard = locks.enter_modify().await;
            if let Err(e) = client.add_loss("undo:disconnect_link", &src, &dst, restore).await {
                warn!(error = %e, "failed to undo link disconnect");
            }
            drop(guard);
            locks.release_in_use();
        }),
    );
}

pub async fn disconnect_link(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            disconnect_link_like(&state, &link, 100.0, (5, 30)).await;
        }
    })
}

/// Same shape as `disconnect_link` but the loss is `Uniform[1,100]%`
/// instead of a fixed 100%, and the undo window is `[10,30]s`.
pub async fn lossy_link(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            let loss = rng.gen_range(1..=100) as f64;
            disconnect_link_like(&state, &link, loss, (10, 30)).await;
        }
    })
}

pub async fn disconnect_router(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let node = state.topology.random_node(&mut rng).to_string();
            if let Err(e) = state.client.disconnect_router("disconnect_router", &node).await {
                warn!(error = %e, "failed to disconnect router");
                continue;
            }

            let deadline = rng.gen_range(60..=300u64);
            let client = state.client.clone();
            let node_clone = node.clone();
            state.undo.enqueue_in(
                Duration::from_secs(deadline),
                Box::pin(async move {
                    if let Err(e) = client.connect_router("undo:disconnect_router", &node_clone).await {
                        warn!(error = %e, "failed to reconnect router");
                    }
                }),
            );
        }
    })
}

/// Irreversible: sets a random bandwidth on a random link.
pub async fn bandwidth_change(state: Arc<OrchestratorState>, rate: f64, seed: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            if !sleep_interruptible(&state, sample_exponential(&mut rng, rate)).await {
                return;
            }
            let link = random_link(&state, &mut rng);
            let kbps = rng.gen_range(100..=10_000u32);
            if let Err(e) = state
                .client
                .set_bandwidth("bandwidth_change", &link.src, &link.dst, &format!("{kbps}kbit"))
                .await
            {
                warn!(error = %e, "failed to change bandwidth");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_to_subnet_masks_a_slash_16() {
        assert_eq!(mask_to_subnet("10.20.30.40", 16), "10.20.0.0/16");
    }

    #[test]
    fn mask_to_subnet_masks_a_slash_24() {
        assert_eq!(mask_to_subnet("10.20.30.40", 24), "10.20.30.0/24");
    }

    #[test]
    fn mask_to_subnet_passes_through_malformed_input() {
        assert_eq!(mask_to_subnet("not-an-ip", 24), "not-an-ip/24");
    }

    #[test]
    fn sample_exponential_is_always_positive() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(sample_exponential(&mut rng, 1.0 / 20.0) > Duration::ZERO);
        }
    }

    #[test]
    fn sample_exponential_tracks_the_configured_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        let mean = 10.0;
        let n = 20_000;
        let total: f64 = (0..n).map(|_| sample_exponential(&mut rng, 1.0 / mean).as_secs_f64()).sum();
        let observed_mean = total / n as f64;
        assert!(
            (observed_mean - mean).abs() < 1.0,
            "observed mean {observed_mean} too far from configured mean {mean}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_interruptible_returns_false_once_shutdown_is_raised() {
        let state = OrchestratorState::new(
            crate::topology::OrchestratorTopology {
                nodes: vec!["r1".to_string()],
                directed: vec![],
                router_ips: Default::default(),
                host_ips: Default::default(),
            },
            chaos_ports::PortPool::new(8000, 8005),
            chaos_undo::UndoScheduler::new(),
            crate::client::ApiClient::new(
                "http://127.0.0.1:0",
                Arc::new(crate::logger::RequestLogger::open(&std::env::temp_dir().join(format!(
                    "chaos-orch-unit-{}",
                    uuid::Uuid::new_v4()
                ))).unwrap()),
            ),
            Arc::new(crate::logger::RequestLogger::open(&std::env::temp_dir().join(format!(
                "chaos-orch-unit-{}",
                uuid::Uuid::new_v4()
            ))).unwrap()),
        );

        state.raise_shutdown();
        let woke_naturally = sleep_interruptible(&state, Duration::from_secs(30)).await;
        assert!(!woke_naturally);
    }
}


//! The orchestrator's view of the lab: fetched once at startup over HTTP
//! from the control plane rather than parsed from lab files directly,
//! since the two are separate processes (mirroring `configure()` in the
//! original `chaos_monkey/script.py`).

use crate::client::ApiClient;
use crate::error::{ChaosError, ChaosResult};
use chaos_types::{DirectedLink, LinkId};
use rand::Rng;
use std::collections::HashMap;

pub struct OrchestratorTopology {
    pub nodes: Vec<String>,
    pub directed: Vec<DirectedLink>,
    pub router_ips: HashMap<String, String>,
    pub host_ips: HashMap<String, String>,
}

impl OrchestratorTopology {
    pub async fn fetch(client: &ApiClient) -> ChaosResult<Self> {
        let nodes = client.available_routers().await?;
        let undirected = client.links().await?;
        let router_ips = client.router_ips().await?;
        let host_ips = client.host_ips().await?;

        if nodes.is_empty() {
            return Err(ChaosError::EmptyConfiguration("routers"));
        }
        if undirected.is_empty() {
            return Err(ChaosError::EmptyConfiguration("links"));
        }
        if router_ips.is_empty() {
            return Err(ChaosError::EmptyConfiguration("router_ips"));
        }
        if host_ips.is_empty() {
            return Err(ChaosError::EmptyConfiguration("host_ips"));
        }

        let mut directed = Vec::with_capacity(undirected.len() * 2);
        let mut next_id = 0u32;
        for (src, dst) in &undirected {
            let forward = LinkId(next_id);
            next_id += 1;
            let reverse = LinkId(next_id);
            next_id += 1;
            directed.push(DirectedLink::new(forward, src.clone(), dst.clone()));
            directed.push(DirectedLink::new(reverse, dst.clone(), src.clone()));
        }

        Ok(Self {
            nodes,
            directed,
            router_ips,
            host_ips,
        })
    }

    pub fn random_link<'a>(&'a self, rng: &mut impl Rng) -> &'a DirectedLink {
        &self.directed[rng.gen_range(0..self.directed.len())]
    }

    pub fn random_node<'a>(&'a self, rng: &mut impl Rng) -> &'a str {
        &self.nodes[rng.gen_range(0..self.nodes.len())]
    }

    /// Picks a random server and 1..=3 distinct random clients, matching
    /// `get_random_server_and_clients`'s "server plus a handful of peers" shape.
    pub fn random_server_and_clients(&self, rng: &mut impl Rng) -> (String, Vec<String>) {
        let server = self.random_node(rng).to_string();
        let max_clients = 3.min(self.nodes.len().saturating_sub(1)).max(1);
        let client_count = rng.gen_range(1..=max_clients);
        let mut clients = Vec::with_capacity(client_count);
        while clients.len() < client_count {
            let candidate = self.random_node(rng).to_string();
            if candidate != server && !clients.contains(&candidate) {
                clients.push(candidate);
            }
        }
        (server, clients)
    }

    pub fn host_ip(&self, node: &str) -> Option<&str> {
        self.host_ips.get(node).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn topology_with(nodes: Vec<&str>) -> OrchestratorTopology {
        OrchestratorTopology {
            nodes: nodes.into_iter().map(String::from).collect(),
            directed: vec![DirectedLink::new(LinkId(0), "a".to_string(), "b".to_string())],
            router_ips: HashMap::new(),
            host_ips: HashMap::new(),
        }
    }

    #[test]
    fn random_server_and_clients_never_picks_the_server_as_a_client() {
        let topology = topology_with(vec!["r1", "r2", "r3", "r4"]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let (server, clients) = topology.random_server_and_clients(&mut rng);
            assert!(!clients.contains(&server));
        }
    }

    #[test]
    fn random_server_and_clients_picks_distinct_clients() {
        let topology = topology_with(vec!["r1", "r2", "r3", "r4"]);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let (_, clients) = topology.random_server_and_clients(&mut rng);
            let mut seen = std::collections::HashSet::new();
            for c in &clients {
                assert!(seen.insert(c), "client {c} repeated in {clients:?}");
            }
        }
    }

    #[test]
    fn random_server_and_clients_handles_a_two_node_topology() {
        let topology = topology_with(vec!["r1", "r2"]);
        let mut rng = StdRng::seed_from_u64(3);
        let (server, clients) = topology.random_server_and_clients(&mut rng);
        assert_eq!(clients.len(), 1);
        assert!(!clients.contains(&server));
    }
}

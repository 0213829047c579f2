use crate::error::{TopologyError, TopologyResult};
use crate::parser::{self, LinkRow};
use chaos_types::{DirectedLink, LinkId, Node, ShapingTuple};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// The immutable-after-load topology: nodes, directed links (forward and
/// reverse of every undirected pair, each with its own id), and the
/// baseline shaping tuple for each undirected pair.
pub struct TopologyModel {
    nodes: HashMap<String, Node>,
    directed: Vec<DirectedLink>,
    link_ids: HashMap<(String, String), LinkId>,
    baselines: HashMap<(String, String), ShapingTuple>,
}

impl TopologyModel {
    /// Loads routers + links for `selected_as` from `labs_dir/lab_name/AS_config.txt`.
    pub fn load(
        labs_dir: &Path,
        lab_name: &str,
        selected_as: &str,
        router_ips: &HashMap<String, String>,
        host_ips: &HashMap<String, String>,
    ) -> TopologyResult<Self> {
        let as_config_path = labs_dir.join(lab_name).join("AS_config.txt");
        let entries = parser::parse_as_config(&as_config_path)?;

        for entry in &entries {
            if parser::as_is_provider(entry) {
                continue;
            }
            if entry.first().map(String::as_str) != Some(selected_as) {
                continue;
            }
            let routers_path = labs_dir.join(lab_name).join(&entry[1]);
            let links_path = labs_dir.join(lab_name).join(&entry[2]);
            let routers = parser::parse_routers(&routers_path)?;
            let link_rows = parser::parse_links(&links_path)?;
            return Ok(Self::from_parts(routers, link_rows, router_ips, host_ips));
        }

        Err(TopologyError::UnknownAs(selected_as.to_string()))
    }

    pub fn from_parts(
        routers: Vec<String>,
        link_rows: Vec<LinkRow>,
        router_ips: &HashMap<String, String>,
        host_ips: &HashMap<String, String>,
    ) -> Self {
        let router_set: HashSet<String> = routers.iter().cloned().collect();

        let mut nodes = HashMap::new();
        for name in &routers {
            let ip = router_ips.get(name).cloned().unwrap_or_default();
            nodes.insert(name.clone(), Node::router(name.clone(), ip));
        }
        for row in &link_rows {
            for endpoint in [&row.host1, &row.host2] {
                if !router_set.contains(endpoint) && !nodes.contains_key(endpoint) {
                    let ip = host_ips.get(endpoint).cloned().unwrap_or_default();
                    nodes.insert(endpoint.clone(), Node::host(endpoint.clone(), ip));
                }
            }
        }

        let mut directed = Vec::new();
        let mut link_ids = HashMap::new();
        let mut baselines = HashMap::new();
        let mut next_id = 0u32;

        for row in &link_rows {
            let baseline = ShapingTuple::new(
                row.loss.clone(),
                row.delay.clone(),
                row.bandwidth.clone(),
                row.burst.clone(),
                row.buffer.clone(),
            );

            let forward_id = LinkId(next_id);
            next_id += 1;
            let reverse_id = LinkId(next_id);
            next_id += 1;

            directed.push(DirectedLink::new(forward_id, row.host1.clone(), row.host2.clone()));
            directed.push(DirectedLink::new(reverse_id, row.host2.clone(), row.host1.clone()));

            link_ids.insert((row.host1.clone(), row.host2.clone()), forward_id);
            link_ids.insert((row.host2.clone(), row.host1.clone()), reverse_id);

            let key = parser::pair_key(&row.host1, &row.host2);
            baselines.insert(key, baseline);
        }

        Self {
            nodes,
            directed,
            link_ids,
            baselines,
        }
    }

    pub fn node(&self, name: &str) -> TopologyResult<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| TopologyError::UnknownNode(name.to_string()))
    }

    pub fn routers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.is_router())
    }

    pub fn directed_links(&self) -> &[DirectedLink] {
        &self.directed
    }

    pub fn link_id(&self, src: &str, dst: &str) -> TopologyResult<LinkId> {
        self.link_ids
            .get(&(src.to_string(), dst.to_string()))
            .copied()
            .ok_or_else(|| TopologyError::UnknownLink(src.to_string(), dst.to_string()))
    }

    pub fn baseline(&self, src: &str, dst: &str) -> TopologyResult<&ShapingTuple> {
        let key = parser::pair_key(src, dst);
        self.baselines
            .get(&key)
            .ok_or_else(|| TopologyError::UnknownLink(src.to_string(), dst.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LinkRow;

    fn sample_row() -> LinkRow {
        LinkRow {
            host1: "r1".to_string(),
            host2: "r2".to_string(),
            bandwidth: "10mbit".to_string(),
            delay: "10ms".to_string(),
            buffer: "50ms".to_string(),
            loss: "0%".to_string(),
            burst: "125000".to_string(),
        }
    }

    #[test]
    fn each_direction_gets_a_distinct_id() {
        let model = TopologyModel::from_parts(
            vec!["r1".to_string(), "r2".to_string()],
            vec![sample_row()],
            &HashMap::new(),
            &HashMap::new(),
        );
        let forward = model.link_id("r1", "r2").unwrap();
        let reverse = model.link_id("r2", "r1").unwrap();
        assert_ne!(forward, reverse);
        assert_eq!(model.directed_links().len(), 2);
    }

    #[test]
    fn baseline_is_shared_across_directions() {
        let model = TopologyModel::from_parts(
            vec!["r1".to_string(), "r2".to_string()],
            vec![sample_row()],
            &HashMap::new(),
            &HashMap::new(),
        );
        assert_eq!(model.baseline("r1", "r2").unwrap(), model.baseline("r2", "r1").unwrap());
    }
}

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: String,
    pub taken_at: DateTime<Utc>,
    pub configs: HashMap<String, String>,
}

/// Append-only in-memory store of full per-node config snapshots. No
/// deletion is exposed; old snapshots simply accumulate for the life of
/// the process.
#[derive(Default)]
pub struct SnapshotStore {
    snapshots: DashMap<String, Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self, configs: HashMap<String, String>) -> Snapshot {
        let snapshot = Snapshot {
            id: generate_id(8),
            taken_at: Utc::now(),
            configs,
        };
        self.snapshots.insert(snapshot.id.clone(), snapshot.clone());
        snapshot
    }

    pub fn get(&self, id: &str) -> Option<Snapshot> {
        self.snapshots.get(id).map(|entry| entry.clone())
    }
}

fn generate_id(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_stores_a_retrievable_snapshot() {
        let store = SnapshotStore::new();
        let mut configs = HashMap::new();
        configs.insert("r1".to_string(), "hostname r1".to_string());

        let snapshot = store.take(configs);
        let fetched = store.get(&snapshot.id).expect("snapshot should be retrievable");
        assert_eq!(fetched.configs.get("r1").unwrap(), "hostname r1");
    }

    #[test]
    fn generated_ids_are_eight_chars() {
        assert_eq!(generate_id(8).len(), 8);
    }
}

use serde::{Deserialize, Serialize};

/// A routable container endpoint in the emulated topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub role: NodeRole,
    pub ip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Router,
    Host,
}

impl Node {
    pub fn router(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Router,
            ip: ip.into(),
        }
    }

    pub fn host(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Host,
            ip: ip.into(),
        }
    }

    pub fn is_router(&self) -> bool {
        matches!(self.role, NodeRole::Router)
    }
}

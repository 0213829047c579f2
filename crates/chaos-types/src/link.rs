use serde::{Deserialize, Serialize};

/// Stable identifier for one direction of a link. Forward and reverse
/// directions of the same undirected pair get distinct ids and, in the
/// rest of the system, distinct locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedLink {
    pub id: LinkId,
    pub src: String,
    pub dst: String,
}

impl DirectedLink {
    pub fn new(id: LinkId, src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            dst: dst.into(),
        }
    }

    pub fn reversed(&self, id: LinkId) -> Self {
        Self::new(id, self.dst.clone(), self.src.clone())
    }
}

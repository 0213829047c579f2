//! Applies routing-engine (FRR/vtysh) directives and full config
//! replacements, and keeps an append-only store of config snapshots.

mod driver;
mod error;
mod snapshot;

pub use driver::RoutingDriver;
pub use error::{RoutingError, RoutingResult};
pub use snapshot::{Snapshot, SnapshotStore};

//! Parses a lab's text-file topology description into the domain model
//! and computes baseline shaping parameters.

mod error;
mod model;
mod parser;

pub use error::{TopologyError, TopologyResult};
pub use model::TopologyModel;
pub use parser::{parse_links, parse_routers, LinkRow};

//! Applies and reads back the five-parameter shaping tuple (loss, delay,
//! bandwidth, burst, buffer) on one direction of a link, and resolves
//! the egress interface for a directed link.

mod driver;
mod error;
mod parse;

pub use driver::ShapingDriver;
pub use error::{ShapingError, ShapingResult};

pub mod container;
pub mod pcap;
pub mod routing;
pub mod shaping;
pub mod snapshot;
pub mod topology;

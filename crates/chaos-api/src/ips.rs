//! IP assignment for a lab's nodes. The original bound this to a Python
//! `match` statement over hardcoded lab names; here it's a small TOML file
//! living next to the lab so adding a lab doesn't require a code change.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct IpAssignments {
    #[serde(default)]
    pub routers: HashMap<String, String>,
    #[serde(default)]
    pub hosts: HashMap<String, String>,
}

impl IpAssignments {
    pub fn load(labs_dir: &Path, lab_name: &str) -> std::io::Result<Self> {
        let path = labs_dir.join(lab_name).join("ips.toml");
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }
}

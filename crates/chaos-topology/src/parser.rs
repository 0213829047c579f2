use crate::error::{TopologyError, TopologyResult};
use chaos_types::compute_burst_size;
use std::collections::HashMap;
use std::path::Path;

/// One row of a lab's `*_links.txt` file, with burst derived when the
/// file doesn't carry one of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub host1: String,
    pub host2: String,
    pub bandwidth: String,
    pub delay: String,
    pub buffer: String,
    pub loss: String,
    pub burst: String,
}

fn read_file(path: &Path) -> TopologyResult<String> {
    std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parses an `AS_config.txt`: each line is `AS<TAB>routers_file<TAB>links_file`
/// with a literal `AS` / `Config  ` header token filtered out, matching the
/// loosely-formatted source files in the wild.
pub fn parse_as_config(path: &Path) -> TopologyResult<Vec<Vec<String>>> {
    let content = read_file(path)?;
    Ok(content
        .lines()
        .map(|line| {
            line.split('\t')
                .map(str::to_string)
                .filter(|entry| entry != "AS" && entry != "Config  ")
                .collect()
        })
        .collect())
}

pub fn as_is_provider(row: &[String]) -> bool {
    row.get(2).map(String::as_str) == Some("empty.txt")
}

/// The first whitespace-separated token of each line is the router name.
pub fn parse_routers(path: &Path) -> TopologyResult<Vec<String>> {
    let content = read_file(path)?;
    Ok(content
        .lines()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect())
}

/// `host1 host2 bandwidth delay buffer` rows; blank lines and separator
/// rows starting with `-` are skipped.
pub fn parse_links(path: &Path) -> TopologyResult<Vec<LinkRow>> {
    let content = read_file(path)?;
    let mut rows = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('-') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < 5 {
            continue;
        }
        let burst = compute_burst_size(parts[2])?.to_string();
        rows.push(LinkRow {
            host1: parts[0].to_string(),
            host2: parts[1].to_string(),
            bandwidth: parts[2].to_string(),
            delay: parts[3].to_string(),
            buffer: parts[4].to_string(),
            loss: "0%".to_string(),
            burst,
        });
    }
    Ok(rows)
}

/// Keys an undirected pair into a canonical, order-independent lookup key.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

pub fn links_by_pair(rows: &[LinkRow]) -> HashMap<(String, String), LinkRow> {
    rows.iter()
        .map(|row| (pair_key(&row.host1, &row.host2), row.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_links_skips_blank_and_separator_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "r1 r2 10mbps 10ms 50ms").unwrap();
        writeln!(file, "----------").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "r2 r3 1mbps 5ms 20ms").unwrap();

        let rows = parse_links(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].host1, "r1");
        assert_eq!(rows[0].host2, "r2");
        assert_eq!(rows[0].loss, "0%");
    }

    #[test]
    fn as_is_provider_checks_third_column() {
        assert!(as_is_provider(&[
            "AS1".to_string(),
            "routers.txt".to_string(),
            "empty.txt".to_string()
        ]));
        assert!(!as_is_provider(&[
            "AS1".to_string(),
            "routers.txt".to_string(),
            "links.txt".to_string()
        ]));
    }
}

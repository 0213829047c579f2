use chaos_types::ShapingTuple;

/// Parses `tc qdisc show dev <iface>` output, falling back to `baseline`
/// for any field the output doesn't mention. Mirrors the field-by-field
/// token scan the original used instead of a strict grammar, since `tc`'s
/// output format varies across kernel versions.
pub fn parse_tc_show(output: &str, baseline: &ShapingTuple) -> ShapingTuple {
    let mut result = baseline.clone();

    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if line.contains("netem") {
            for (i, part) in parts.iter().enumerate() {
                match *part {
                    "loss" if i + 1 < parts.len() => result.loss = parts[i + 1].to_string(),
                    "delay" if i + 1 < parts.len() => result.delay = parts[i + 1].to_string(),
                    _ => {}
                }
            }
        } else if line.contains("tbf") {
            for (i, part) in parts.iter().enumerate() {
                match *part {
                    "rate" if i + 1 < parts.len() => result.bandwidth = parts[i + 1].to_string(),
                    "burst" if i + 1 < parts.len() => result.burst = parts[i + 1].to_string(),
                    "lat" if i + 1 < parts.len() => result.buffer = parts[i + 1].to_string(),
                    _ => {}
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_netem_and_tbf_lines() {
        let baseline = ShapingTuple::new("0%", "10ms", "10mbit", "125000", "50ms");
        let output = "qdisc netem 1: root refcnt 2 limit 1000 delay 25ms loss 5%\n\
                       qdisc tbf 10: parent 1:1 rate 10Mbit burst 125000b lat 50.0ms";
        let parsed = parse_tc_show(output, &baseline);
        assert_eq!(parsed.loss, "5%");
        assert_eq!(parsed.delay, "25ms");
        assert_eq!(parsed.bandwidth, "10Mbit");
        assert_eq!(parsed.burst, "125000b");
        assert_eq!(parsed.buffer, "50.0ms");
    }

    #[test]
    fn falls_back_to_baseline_when_qdisc_absent() {
        let baseline = ShapingTuple::new("0%", "10ms", "10mbit", "125000", "50ms");
        let parsed = parse_tc_show("qdisc noqueue 0: root refcnt 2", &baseline);
        assert_eq!(parsed, baseline);
    }
}

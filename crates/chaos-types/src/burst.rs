use crate::error::TypesError;

const MTU_BYTES: u64 = 1500;

/// Burst size in bits: 10% of the throughput over one second, floored at
/// ten MTUs worth of bits. `throughput` is a leading-number-then-unit
/// string such as "10mbps" or "1gbps"; an absent unit is treated as
/// raw bits per second.
pub fn compute_burst_size(throughput: &str) -> Result<u64, TypesError> {
    let min_burst = 10 * MTU_BYTES * 8;

    let split_at = throughput
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(throughput.len());
    let (value_part, unit_part) = throughput.split_at(split_at);

    let value: f64 = value_part
        .parse()
        .map_err(|_| TypesError::InvalidThroughput(throughput.to_string()))?;
    let unit = unit_part.to_ascii_lowercase();

    let multiplier: f64 = match unit.as_str() {
        "" | "bps" => 1.0,
        "kbps" => 1_000.0,
        "mbps" => 1_000_000.0,
        "gbps" => 1_000_000_000.0,
        "tbps" => 1_000_000_000_000.0,
        "kibps" => 1024.0,
        "mibps" => 1024.0f64.powi(2),
        "gibps" => 1024.0f64.powi(3),
        "tibps" => 1024.0f64.powi(4),
        _ => return Err(TypesError::InvalidThroughput(throughput.to_string())),
    };

    let bits_per_second = value * multiplier;
    let burst = (0.1 * bits_per_second) as u64;
    Ok(burst.max(min_burst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_of_throughput() {
        // 10mbps -> 1_000_000 bits burst, well above the MTU floor.
        assert_eq!(compute_burst_size("10mbps").unwrap(), 1_000_000);
    }

    #[test]
    fn floors_at_ten_mtus() {
        // A tiny throughput must still clear 10*1500*8 = 120000 bits.
        assert_eq!(compute_burst_size("1kbps").unwrap(), 120_000);
    }

    #[test]
    fn binary_units() {
        assert_eq!(compute_burst_size("1mibps").unwrap(), (0.1 * 1024.0 * 1024.0) as u64);
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(compute_burst_size("10frobs").is_err());
    }
}

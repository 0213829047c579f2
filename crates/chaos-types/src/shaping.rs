use serde::{Deserialize, Serialize};

/// The five-parameter shaping state applied to one direction of a link.
/// Values are kept as unit-bearing strings exactly as produced by (and fed
/// back into) the kernel shaping layer; callers that need a number parse
/// on demand rather than the other way around, since the shaping layer is
/// the source of truth for formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapingTuple {
    pub loss: String,
    pub delay: String,
    pub bandwidth: String,
    pub burst: String,
    pub buffer: String,
}

impl ShapingTuple {
    pub fn new(
        loss: impl Into<String>,
        delay: impl Into<String>,
        bandwidth: impl Into<String>,
        burst: impl Into<String>,
        buffer: impl Into<String>,
    ) -> Self {
        Self {
            loss: loss.into(),
            delay: delay.into(),
            bandwidth: bandwidth.into(),
            burst: burst.into(),
            buffer: buffer.into(),
        }
    }

    /// Parsed loss percentage, e.g. "12%" -> 12.0. Falls back to 0 when
    /// the field isn't a recognizable percentage (no qdisc has been
    /// applied yet, or the format changed upstream).
    pub fn loss_percent(&self) -> f64 {
        self.loss
            .trim_end_matches('%')
            .parse::<f64>()
            .unwrap_or(0.0)
    }

    /// Parsed delay in whole milliseconds, e.g. "10ms" -> 10. Falls back
    /// to 5ms on parse failure, matching the fallback the original
    /// delay-spike event used when the live qdisc text didn't parse.
    pub fn delay_ms(&self) -> u64 {
        self.delay
            .trim_end_matches("ms")
            .trim_end_matches('s')
            .parse::<u64>()
            .unwrap_or(5)
    }

    pub fn with_loss(&self, loss: impl Into<String>) -> Self {
        Self {
            loss: loss.into(),
            ..self.clone()
        }
    }

    pub fn with_delay(&self, delay: impl Into<String>) -> Self {
        Self {
            delay: delay.into(),
            ..self.clone()
        }
    }

    pub fn with_bandwidth(&self, bandwidth: impl Into<String>) -> Self {
        Self {
            bandwidth: bandwidth.into(),
            ..self.clone()
        }
    }

    pub fn with_burst(&self, burst: impl Into<String>) -> Self {
        Self {
            burst: burst.into(),
            ..self.clone()
        }
    }

    pub fn with_buffer(&self, buffer: impl Into<String>) -> Self {
        Self {
            buffer: buffer.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_percent_parses_trailing_sign() {
        let t = ShapingTuple::new("12%", "10ms", "10mbit", "125000", "50ms");
        assert_eq!(t.loss_percent(), 12.0);
    }

    #[test]
    fn delay_ms_falls_back_on_garbage() {
        let t = ShapingTuple::new("0%", "garbage", "10mbit", "125000", "50ms");
        assert_eq!(t.delay_ms(), 5);
    }

    #[test]
    fn with_loss_preserves_other_fields() {
        let t = ShapingTuple::new("0%", "10ms", "10mbit", "125000", "50ms");
        let t2 = t.with_loss("100%");
        assert_eq!(t2.delay, t.delay);
        assert_eq!(t2.bandwidth, t.bandwidth);
        assert_eq!(t2.burst, t.burst);
        assert_eq!(t2.buffer, t.buffer);
        assert_eq!(t2.loss, "100%");
    }

    /// Mirrors a set/reset independence scenario: baseline
    /// `(0%, 10ms, 10mbit, 125000, 50ms)`, then `set_buffer(200ms)`, then
    /// `set_bandwidth(5mbit)`, then a reset of buffer alone (substituting
    /// only the buffer field back to its baseline value) must leave the
    /// live bandwidth change untouched.
    #[test]
    fn resetting_one_field_preserves_an_unrelated_live_change() {
        let baseline = ShapingTuple::new("0%", "10ms", "10mbit", "125000", "50ms");
        let live = baseline.with_buffer("200ms").with_bandwidth("5mbit");

        let after_reset = live.with_buffer(baseline.buffer.clone());

        assert_eq!(after_reset.loss, "0%");
        assert_eq!(after_reset.delay, "10ms");
        assert_eq!(after_reset.bandwidth, "5mbit");
        assert_eq!(after_reset.burst, "125000");
        assert_eq!(after_reset.buffer, "50ms");
    }
}

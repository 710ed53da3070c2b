use std::fmt;
use std::time::Duration;

#[cfg(feature = "json")]
use serde::Serialize;

/// Address being monitored, normalized once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Target {
    pub url: String,
}

impl Target {
    /// Build a target from user input, adding the default scheme when missing.
    pub fn new(raw: &str) -> Self {
        Self {
            url: crate::adapters::target::normalize(raw),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// How a single probe ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ProbeOutcome {
    /// Response in the success/redirect range; carries the status text.
    Up { status: String },
    /// Response received but outside the success range.
    Rejected { reason: String },
    /// Transport failure or timeout.
    Unreachable { reason: String },
}

/// Result of probing one target during one cycle.
#[derive(Clone, Debug)]
pub struct ProbeResult {
    pub target: Target,
    pub latency: Duration,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn reachable(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Up { .. })
    }

    pub fn status_label(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Up { status } => Some(status),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Up { .. } => None,
            ProbeOutcome::Rejected { reason } | ProbeOutcome::Unreachable { reason } => {
                Some(reason)
            }
        }
    }

    /// Message shown in the dashboard's last column.
    pub fn message(&self) -> &str {
        match &self.outcome {
            ProbeOutcome::Up { status } => status,
            ProbeOutcome::Rejected { reason } | ProbeOutcome::Unreachable { reason } => reason,
        }
    }

    pub fn latency_ms(&self) -> u64 {
        (self.latency.as_secs_f64() * 1000.0).round() as u64
    }

    pub fn health(&self, slow_threshold: Duration) -> Health {
        if !self.reachable() {
            Health::Down
        } else if self.latency > slow_threshold {
            Health::Degraded
        } else {
            Health::Healthy
        }
    }
}

/// Tri-state classification used by the dashboard indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum Health {
    Healthy,
    Degraded,
    Down,
}

impl Health {
    pub fn label(self) -> &'static str {
        match self {
            Health::Healthy => "UP",
            Health::Degraded => "SLOW",
            Health::Down => "DOWN",
        }
    }
}

/// One complete pass over every target, in target order.
#[derive(Clone, Debug)]
pub struct Cycle {
    results: Vec<ProbeResult>,
}

impl Cycle {
    pub(crate) fn new(results: Vec<ProbeResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(latency_ms: u64, outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult {
            target: Target::new("example.com"),
            latency: Duration::from_millis(latency_ms),
            outcome,
        }
    }

    #[test]
    fn outcome_exposes_exactly_one_message() {
        let up = result(10, ProbeOutcome::Up { status: "200 OK".into() });
        assert!(up.reachable());
        assert_eq!(up.status_label(), Some("200 OK"));
        assert_eq!(up.failure_reason(), None);

        let down = result(10, ProbeOutcome::Unreachable { reason: "Error: refused".into() });
        assert!(!down.reachable());
        assert_eq!(down.status_label(), None);
        assert_eq!(down.failure_reason(), Some("Error: refused"));

        let rejected = result(10, ProbeOutcome::Rejected { reason: "HTTP 503".into() });
        assert!(!rejected.reachable());
        assert_eq!(rejected.failure_reason(), Some("HTTP 503"));
    }

    #[test]
    fn health_uses_threshold_only_when_reachable() {
        let threshold = Duration::from_millis(500);
        let up = |ms| result(ms, ProbeOutcome::Up { status: "200 OK".into() });
        assert_eq!(up(50).health(threshold), Health::Healthy);
        assert_eq!(up(500).health(threshold), Health::Healthy);
        assert_eq!(up(800).health(threshold), Health::Degraded);

        let down = result(5, ProbeOutcome::Unreachable { reason: "x".into() });
        assert_eq!(down.health(threshold), Health::Down);
    }

    #[test]
    fn latency_rounds_to_nearest_millisecond() {
        let mut r = result(0, ProbeOutcome::Up { status: "200 OK".into() });
        r.latency = Duration::from_micros(52_600);
        assert_eq!(r.latency_ms(), 53);
        r.latency = Duration::from_micros(52_400);
        assert_eq!(r.latency_ms(), 52);
    }
}

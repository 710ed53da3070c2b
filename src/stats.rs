use std::time::Duration;

use crate::domain::health::{Cycle, Health};
#[cfg(feature = "json")]
use serde::Serialize;

/// Per-cycle summary. Built from a single cycle; nothing is carried over.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Stats {
    pub count: usize,
    pub healthy: usize,
    pub degraded: usize,
    pub down: usize,
    pub latency_avg_ms: f64,
    pub latency_max_ms: u64,
}

pub fn compute_stats(cycle: &Cycle, slow_threshold: Duration) -> Stats {
    let results = cycle.results();
    let count = results.len();
    if count == 0 {
        return Stats::default();
    }
    let mut stats = Stats {
        count,
        ..Stats::default()
    };
    for r in results {
        match r.health(slow_threshold) {
            Health::Healthy => stats.healthy += 1,
            Health::Degraded => stats.degraded += 1,
            Health::Down => stats.down += 1,
        }
    }
    stats.latency_avg_ms =
        results.iter().map(|r| r.latency_ms() as f64).sum::<f64>() / count as f64;
    stats.latency_max_ms = results.iter().map(|r| r.latency_ms()).max().unwrap_or(0);
    stats
}

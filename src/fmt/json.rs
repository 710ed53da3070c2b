use chrono::{DateTime, Local};
#[cfg(feature = "json")]
use serde::Serialize;
use std::time::Duration;

use crate::domain::health::Cycle;
#[cfg(feature = "json")]
use crate::domain::health::{Health, ProbeOutcome};
use crate::error::MonitorError;
#[cfg(feature = "json")]
use crate::stats::{Stats, compute_stats};

#[cfg(feature = "json")]
#[derive(Serialize)]
pub struct JsonProbe<'a> {
    pub url: &'a str,
    pub reachable: bool,
    pub health: Health,
    pub latency_ms: u64,
    #[serde(flatten)]
    pub outcome: &'a ProbeOutcome,
}

#[cfg(feature = "json")]
#[derive(Serialize)]
pub struct JsonCycle<'a> {
    pub schema_version: u8,
    pub run_ts: String,
    pub summary: Stats,
    pub results: Vec<JsonProbe<'a>>,
}

/// Serialize one cycle into a single-line JSON document.
#[allow(unused_variables)]
pub fn cycle_to_json(
    cycle: &Cycle,
    timestamp: DateTime<Local>,
    slow_threshold: Duration,
) -> Result<String, MonitorError> {
    #[cfg(feature = "json")]
    {
        let results = cycle
            .results()
            .iter()
            .map(|r| JsonProbe {
                url: &r.target.url,
                reachable: r.reachable(),
                health: r.health(slow_threshold),
                latency_ms: r.latency_ms(),
                outcome: &r.outcome,
            })
            .collect();
        let run = JsonCycle {
            schema_version: 1,
            run_ts: timestamp.to_rfc3339(),
            summary: compute_stats(cycle, slow_threshold),
            results,
        };
        Ok(serde_json::to_string(&run)?)
    }
    #[cfg(not(feature = "json"))]
    {
        Err(MonitorError::Settings("json feature disabled".into()))
    }
}

use chrono::{DateTime, Local};
use std::future::Future;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::adapters::http_client::HttpProber;
use crate::domain::health::{Cycle, Target};

use super::cycle::run_cycle;

/// Runs a cycle immediately, then once per `interval`.
///
/// Cycles never overlap: a cycle that overruns its slot is followed straight
/// away by the next one, after which the fixed period resumes.
pub struct Scheduler {
    prober: HttpProber,
    targets: Vec<Target>,
    interval: Duration,
    max_cycles: Option<u64>,
}

impl Scheduler {
    pub fn new(prober: HttpProber, targets: Vec<Target>, interval: Duration) -> Self {
        Self {
            prober,
            targets,
            interval,
            max_cycles: None,
        }
    }

    /// Stop after `n` cycles instead of running until shutdown.
    pub fn with_max_cycles(mut self, n: Option<u64>) -> Self {
        self.max_cycles = n;
        self
    }

    /// Drive cycles until `shutdown` resolves (or the cycle limit is hit),
    /// handing each finished cycle to `on_cycle`. Returns the number of
    /// completed cycles.
    ///
    /// A cycle still in flight when `shutdown` resolves is dropped.
    pub async fn run<S, F>(&self, shutdown: S, mut on_cycle: F) -> u64
    where
        S: Future<Output = ()>,
        F: FnMut(&Cycle, DateTime<Local>),
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            targets = self.targets.len(),
            interval_ms = self.interval.as_millis() as u64,
            timeout_ms = self.prober.timeout().as_millis() as u64,
            "monitor started"
        );

        let mut completed = 0u64;
        loop {
            if self.max_cycles.is_some_and(|n| completed >= n) {
                break;
            }
            let next = async {
                ticker.tick().await;
                run_cycle(&self.prober, &self.targets).await
            };
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(cycles = completed, "shutdown requested");
                    break;
                }
                cycle = next => {
                    on_cycle(&cycle, Local::now());
                    completed += 1;
                }
            }
        }
        completed
    }
}

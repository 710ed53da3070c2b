use futures::future::join_all;
use std::time::Instant;
use tokio::task::AbortHandle;
use tracing::{debug, instrument, warn};

use crate::adapters::http_client::HttpProber;
use crate::domain::health::{Cycle, ProbeOutcome, ProbeResult, Target};

/// Aborts the wrapped tasks when dropped, so probes do not outlive a
/// cancelled cycle.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Probe every target concurrently and return one [`ProbeResult`] per target,
/// in the order of `targets`.
///
/// Each probe runs on its own task and is bounded by the prober's timeout, so
/// the whole cycle takes about as long as the slowest single probe. Dropping
/// the returned future aborts the probes still running.
#[instrument(skip_all, fields(targets = targets.len()))]
pub async fn run_cycle(prober: &HttpProber, targets: &[Target]) -> Cycle {
    let started = Instant::now();
    let handles = targets
        .iter()
        .cloned()
        .map(|target| {
            let prober = prober.clone();
            tokio::spawn(async move { prober.probe(&target).await })
        })
        .collect::<Vec<_>>();
    let _guard = AbortOnDrop(handles.iter().map(|h| h.abort_handle()).collect());
    let joined = join_all(handles).await;

    let results = joined
        .into_iter()
        .zip(targets)
        .map(|(res, target)| match res {
            Ok(result) => result,
            Err(e) => {
                warn!(url = %target.url, error = %e, "probe task failed");
                ProbeResult {
                    target: target.clone(),
                    latency: started.elapsed(),
                    outcome: ProbeOutcome::Unreachable {
                        reason: "Error: probe task failed".into(),
                    },
                }
            }
        })
        .collect::<Vec<_>>();

    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "cycle complete");
    Cycle::new(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_the_guard_aborts_running_tasks() {
        let handle = tokio::spawn(std::future::pending::<()>());
        let guard = AbortOnDrop(vec![handle.abort_handle()]);
        drop(guard);
        let err = handle.await.unwrap_err();
        assert!(err.is_cancelled());
    }
}

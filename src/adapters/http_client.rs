use std::error::Error as StdError;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode, redirect};
use tracing::{debug, instrument};

use crate::domain::health::{ProbeOutcome, ProbeResult, Target};
use crate::error::MonitorError;

/// Status codes counted as a live endpoint.
pub const SUCCESS_RANGE: RangeInclusive<u16> = 200..=399;

/// Longest message a probe may report, ellipsis included.
pub const MESSAGE_CAP: usize = 30;

const ELLIPSIS: &str = "...";

/// Redirect hops followed before giving up on a target.
pub const MAX_REDIRECTS: usize = 10;

/// Issues one bounded GET per target.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("healthdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single target. Never fails: every error ends up in the result.
    #[instrument(skip_all, fields(url = %target.url))]
    pub async fn probe(&self, target: &Target) -> ProbeResult {
        let start = Instant::now();
        let res = self
            .client
            .get(&target.url)
            .timeout(self.timeout)
            .send()
            .await;
        let latency = start.elapsed();

        let outcome = match res {
            Ok(resp) => classify_status(resp.status()),
            Err(e) => ProbeOutcome::Unreachable {
                reason: truncate_message(&format!(
                    "Error: {}",
                    describe_error(&e, self.timeout)
                )),
            },
        };
        debug!(latency_ms = latency.as_millis() as u64, outcome = ?outcome, "probe finished");

        ProbeResult {
            target: target.clone(),
            latency,
            outcome,
        }
    }
}

/// Map the final response status, after redirects, to an outcome.
pub fn classify_status(status: StatusCode) -> ProbeOutcome {
    if SUCCESS_RANGE.contains(&status.as_u16()) {
        ProbeOutcome::Up {
            status: status.to_string(),
        }
    } else {
        ProbeOutcome::Rejected {
            reason: truncate_message(&format!("HTTP {status}")),
        }
    }
}

/// Short summary of a transport error: timeouts and redirect loops are
/// named as such, anything else reports the innermost cause.
fn describe_error(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        return format!("timed out after {timeout:?}");
    }
    if err.is_redirect() {
        return "too many redirects".to_string();
    }
    let mut root: &dyn StdError = err;
    while let Some(source) = root.source() {
        root = source;
    }
    root.to_string()
}

/// Cap `msg` at [`MESSAGE_CAP`] characters, marking the cut with an ellipsis.
pub fn truncate_message(msg: &str) -> String {
    if msg.chars().count() <= MESSAGE_CAP {
        return msg.to_string();
    }
    let keep = MESSAGE_CAP - ELLIPSIS.len();
    let mut out: String = msg.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

use chrono::{DateTime, Local};
use console::{Alignment, StyledObject, pad_str, style};
use std::time::Duration;

use crate::adapters::http_client::{MESSAGE_CAP, truncate_message};
use crate::domain::health::{Cycle, Health};
use crate::stats::compute_stats;

const RULE_WIDTH: usize = 60;
const GAP: &str = "   ";
const STATUS_WIDTH: usize = 6;

/// Formats a [`Cycle`] into the dashboard frame.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    slow_threshold: Duration,
    latency_width: usize,
}

impl Renderer {
    /// `timeout` sizes the latency column so it stays put from one frame to
    /// the next; a latency that still overflows widens it for that frame.
    pub fn new(slow_threshold: Duration, timeout: Duration) -> Self {
        Self {
            slow_threshold,
            latency_width: latency_label(timeout.as_millis()).len().max("LATENCY".len()),
        }
    }

    /// Render the whole frame. Output only depends on `cycle` and `timestamp`.
    pub fn render(&self, cycle: &Cycle, timestamp: DateTime<Local>) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = format!(
            "{} - {}\n{rule}\n",
            style("Health Check Dashboard").bold(),
            timestamp.format("%H:%M:%S")
        );

        let url_width = cycle
            .results()
            .iter()
            .map(|r| r.target.url.chars().count())
            .max()
            .unwrap_or(0)
            .max("URL".len());
        let latency_width = cycle
            .results()
            .iter()
            .map(|r| latency_label(r.latency_ms()).len())
            .max()
            .unwrap_or(0)
            .max(self.latency_width);

        out.push_str(&row(
            &style("STATUS").bold().to_string(),
            &style("URL").bold().to_string(),
            &style("LATENCY").bold().to_string(),
            &style("MSG").bold().to_string(),
            url_width,
            latency_width,
        ));
        for r in cycle.results() {
            let health = r.health(self.slow_threshold);
            out.push_str(&row(
                &indicator(health).to_string(),
                &r.target.url,
                &latency_label(r.latency_ms()),
                &truncate_message(r.message()),
                url_width,
                latency_width,
            ));
        }

        let stats = compute_stats(cycle, self.slow_threshold);
        out.push_str(&format!(
            "{rule}\n{} healthy, {} degraded, {} down of {}\n{}\n",
            style(stats.healthy).green(),
            style(stats.degraded).yellow(),
            style(stats.down).red(),
            stats.count,
            style("Press Ctrl+C to exit").dim()
        ));
        out
    }
}

fn indicator(health: Health) -> StyledObject<String> {
    let text = format!("● {}", health.label());
    match health {
        Health::Healthy => style(text).green(),
        Health::Degraded => style(text).yellow(),
        Health::Down => style(text).red().bold(),
    }
}

fn latency_label(ms: impl std::fmt::Display) -> String {
    format!("{ms}ms")
}

fn row(
    status: &str,
    url: &str,
    latency: &str,
    msg: &str,
    url_width: usize,
    latency_width: usize,
) -> String {
    format!(
        "{}{GAP}{}{GAP}{}{GAP}{}\n",
        pad_str(status, STATUS_WIDTH, Alignment::Left, None),
        pad_str(url, url_width, Alignment::Left, None),
        pad_str(latency, latency_width, Alignment::Left, None),
        pad_str(msg, MESSAGE_CAP, Alignment::Left, Some("...")).trim_end()
    )
}

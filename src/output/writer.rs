use chrono::{DateTime, Local};
use console::Term;
use std::io;
use std::time::Duration;
use tracing::warn;

use crate::domain::health::Cycle;
use crate::fmt::json::cycle_to_json;
use crate::fmt::text::Renderer;

/// Where each finished cycle goes.
pub enum CycleWriter {
    /// Full-screen dashboard, redrawn in place every cycle.
    Dashboard { term: Term, renderer: Renderer },
    /// One JSON document per line, appended.
    JsonLines { term: Term, slow_threshold: Duration },
}

impl CycleWriter {
    pub fn dashboard(term: Term, slow_threshold: Duration, timeout: Duration) -> Self {
        CycleWriter::Dashboard {
            term,
            renderer: Renderer::new(slow_threshold, timeout),
        }
    }

    pub fn json_lines(term: Term, slow_threshold: Duration) -> Self {
        CycleWriter::JsonLines {
            term,
            slow_threshold,
        }
    }

    /// Emit one cycle. Output failures are logged, never fatal.
    pub fn write(&self, cycle: &Cycle, timestamp: DateTime<Local>) {
        if let Err(e) = self.try_write(cycle, timestamp) {
            warn!(error = %e, "failed to write cycle");
        }
    }

    fn try_write(&self, cycle: &Cycle, timestamp: DateTime<Local>) -> io::Result<()> {
        match self {
            CycleWriter::Dashboard { term, renderer } => {
                let frame = renderer.render(cycle, timestamp);
                term.clear_screen()?;
                term.write_str(&frame)?;
                term.flush()
            }
            CycleWriter::JsonLines {
                term,
                slow_threshold,
            } => {
                let line = cycle_to_json(cycle, timestamp, *slow_threshold)
                    .map_err(|e| io::Error::other(e.to_string()))?;
                term.write_line(&line)
            }
        }
    }
}

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::domain::health::Target;
use crate::error::MonitorError;

pub const DEFAULT_INTERVAL_SECS: f64 = 3.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 2.0;
pub const DEFAULT_SLOW_MS: u64 = 500;

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interval: Duration,
    pub timeout: Duration,
    pub slow_threshold: Duration,
    pub max_cycles: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(2),
            slow_threshold: Duration::from_millis(DEFAULT_SLOW_MS),
            max_cycles: None,
        }
    }
}

impl Settings {
    /// Build settings from command-line units.
    ///
    /// The probe timeout must be strictly shorter than the refresh interval so
    /// a hung target cannot push a cycle past its slot.
    pub fn from_cli(
        interval_secs: f64,
        timeout_secs: f64,
        slow_ms: u64,
        count: Option<u64>,
    ) -> Result<Self, MonitorError> {
        let interval = positive_secs("interval", interval_secs)?;
        let timeout = positive_secs("timeout", timeout_secs)?;
        if timeout >= interval {
            return Err(MonitorError::Settings(format!(
                "timeout ({timeout_secs}s) must be shorter than interval ({interval_secs}s)"
            )));
        }
        if count == Some(0) {
            return Err(MonitorError::Settings("count must be at least 1".into()));
        }
        Ok(Self {
            interval,
            timeout,
            slow_threshold: Duration::from_millis(slow_ms),
            max_cycles: count,
        })
    }
}

fn positive_secs(name: &str, value: f64) -> Result<Duration, MonitorError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MonitorError::Settings(format!(
            "{name} must be a positive number of seconds, got {value}"
        )));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| MonitorError::Settings(format!("{name}: {e}")))
}

/// Extract target addresses from a target file body.
///
/// One address per line; blank lines and `#` comments are skipped.
pub fn parse_target_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Collect and normalize targets: positional arguments first, then the
/// target file, order preserved.
pub fn load_targets(
    positional: &[String],
    file: Option<&Path>,
) -> Result<Vec<Target>, MonitorError> {
    let mut raw: Vec<String> = positional
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(path) = file {
        let content = fs::read_to_string(path).map_err(|source| MonitorError::TargetFile {
            path: path.to_path_buf(),
            source,
        })?;
        raw.extend(parse_target_list(&content));
    }
    if raw.is_empty() {
        return Err(MonitorError::NoTargets);
    }
    Ok(raw.iter().map(|s| Target::new(s)).collect())
}

//! healthdash library: concurrent HTTP probing of a fixed target list,
//! scheduled in cycles and rendered as a terminal dashboard.

pub mod adapters;
pub mod config;
pub mod domain;
mod error;
pub mod fmt;
pub mod output;
pub mod services;
pub mod stats;

pub use adapters::http_client::HttpProber;
pub use config::Settings;
pub use domain::health::{Cycle, Health, ProbeOutcome, ProbeResult, Target};
pub use error::MonitorError;
pub use services::cycle::run_cycle;
pub use services::scheduler::Scheduler;

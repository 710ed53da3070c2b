use clap::Parser;
use console::{Term, set_colors_enabled, style};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use tokio::signal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use healthdash::config::{
    DEFAULT_INTERVAL_SECS, DEFAULT_SLOW_MS, DEFAULT_TIMEOUT_SECS, Settings, load_targets,
};
use healthdash::output::writer::CycleWriter;
use healthdash::{HttpProber, MonitorError, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "healthdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent endpoint health monitor with a live terminal dashboard")]
struct Args {
    /// Addresses to monitor - Examples: [example.com, localhost:8080, https://api.example/health]
    targets: Vec<String>,

    /// Read additional targets from a file (one per line, '#' comments allowed)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short = 'i', long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: f64,

    /// Per-probe timeout in seconds (must be below the interval)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: f64,

    /// Latency above which a reachable target is shown as degraded
    #[arg(long = "slow-ms", default_value_t = DEFAULT_SLOW_MS)]
    slow_ms: u64,

    /// Stop after this many cycles
    #[arg(short = 'c', long)]
    count: Option<u64>,

    /// Emit one JSON document per cycle instead of the dashboard
    #[arg(short = 'j', long)]
    json: bool,

    /// Disable colored output
    #[arg(long = "no-color", alias = "nocolor")]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let want_color = !args.json
        && io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && !args.no_color;
    set_colors_enabled(want_color);

    let term = Term::stdout();
    let code = match run(&args, &term).await {
        Ok(()) => 0,
        Err(e) => handle_error(&term, e),
    };
    process::exit(code);
}

async fn run(args: &Args, term: &Term) -> Result<(), MonitorError> {
    let settings = Settings::from_cli(args.interval, args.timeout, args.slow_ms, args.count)?;
    let targets = load_targets(&args.targets, args.file.as_deref())?;
    let prober = HttpProber::new(settings.timeout)?;

    let writer = if args.json {
        CycleWriter::json_lines(term.clone(), settings.slow_threshold)
    } else {
        CycleWriter::dashboard(term.clone(), settings.slow_threshold, settings.timeout)
    };

    let scheduler =
        Scheduler::new(prober, targets, settings.interval).with_max_cycles(settings.max_cycles);
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };
    scheduler
        .run(shutdown, |cycle, ts| writer.write(cycle, ts))
        .await;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "healthdash=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn handle_error(term: &Term, err: MonitorError) -> i32 {
    term.write_line(&style(format!("Error: {}", err)).red().to_string())
        .ok();
    match err {
        MonitorError::NoTargets => {
            term.write_line("Usage: healthdash <url1> <url2> ...").ok();
            1
        }
        MonitorError::Settings(_) => 2,
        MonitorError::TargetFile { .. } => 3,
        _ => 1,
    }
}

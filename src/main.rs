//! CLI entry point for the WiFi throughput statistics report.
//!
//! Reads qperf and iperf3 result files, buckets them by interface and time of
//! day, prints a summary table and saves it as CSV.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use wifi_throughput_stats::aggregate::MidnightPolicy;
use wifi_throughput_stats::config::Config;
use wifi_throughput_stats::pipeline;

#[derive(Parser)]
#[command(name = "wifi_throughput_stats")]
#[command(about = "Summarize qperf/iperf3 WiFi throughput by time of day", long_about = None)]
struct Cli {
    /// Directory holding qperf result files [default: ~/build-qperf/qperf_result]
    #[arg(long, value_name = "DIR")]
    qperf_dir: Option<PathBuf>,

    /// Directory holding iperf3 JSON result files [default: ~/build-qperf/iperf3_result]
    #[arg(long, value_name = "DIR")]
    iperf_dir: Option<PathBuf>,

    /// CSV file to write [default: ~/build-qperf/wifi_throughput_stats.csv]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Wrap samples that run past midnight into the next day instead of dropping them
    #[arg(long, default_value_t = false)]
    wrap_midnight: bool,
}

impl Cli {
    fn into_config(self, home: &Path) -> Config {
        let mut config = Config::from_home(home);
        if let Some(dir) = self.qperf_dir {
            config.qperf_dir = dir;
        }
        if let Some(dir) = self.iperf_dir {
            config.iperf_dir = dir;
        }
        if let Some(output) = self.output {
            config.output_csv = output;
        }
        if self.wrap_midnight {
            config.midnight = MidnightPolicy::Wrap;
        }
        config
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr, plus a JSON rolling log file when LOG_FILE_PATH is set
    let (json_layer, _file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("wifi_throughput_stats.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let home = match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            warn!("HOME is not set, using the current directory");
            PathBuf::from(".")
        }
    };
    let config = cli.into_config(&home);

    info!(
        qperf_dir = %config.qperf_dir.display(),
        iperf_dir = %config.iperf_dir.display(),
        midnight = ?config.midnight,
        "Building throughput report"
    );

    pipeline::run(&config);

    Ok(())
}

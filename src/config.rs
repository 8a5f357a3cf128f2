//! Input and output locations.

use std::path::{Path, PathBuf};

use crate::aggregate::MidnightPolicy;

/// Everything a report run needs to know about where files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub qperf_dir: PathBuf,
    pub iperf_dir: PathBuf,
    pub output_csv: PathBuf,
    pub midnight: MidnightPolicy,
}

impl Config {
    /// The standard layout under `<home>/build-qperf`.
    pub fn from_home(home: &Path) -> Self {
        let base = home.join("build-qperf");
        Self {
            qperf_dir: base.join("qperf_result"),
            iperf_dir: base.join("iperf3_result"),
            output_csv: base.join("wifi_throughput_stats.csv"),
            midnight: MidnightPolicy::default(),
        }
    }
}

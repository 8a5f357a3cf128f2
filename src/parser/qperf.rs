//! qperf line-oriented result files.
//!
//! Only lines containing `second <n>: <mbit> mbit/s` matter; everything else
//! (RTT lines, banners) is ignored.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::RunParser;
use crate::error::ParseError;
use crate::model::{DataSource, Run, Sample};
use crate::timestamp::start_time_from_filename;

static THROUGHPUT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"second (\d+): ([\d.]+) mbit/s").expect("throughput line pattern is valid")
});

/// Parser for `*qperf_throughput_rtt_<YYYYMMDD>_<HHMMSS>.txt` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct QperfParser;

impl RunParser for QperfParser {
    fn parse(&self, name: &str, contents: &str) -> Result<Run, ParseError> {
        let start_time = start_time_from_filename(name, DataSource::Qperf.extension())?;

        let mut samples = Vec::new();
        for caps in contents.lines().filter_map(|line| THROUGHPUT_LINE.captures(line)) {
            let offset_secs = caps[1].parse::<u64>().map_err(|e| ParseError::Content {
                file: name.to_string(),
                reason: format!("second {:?}: {e}", &caps[1]),
            })?;
            let mbps = caps[2].parse::<f64>().map_err(|e| ParseError::Content {
                file: name.to_string(),
                reason: format!("throughput {:?}: {e}", &caps[2]),
            })?;
            samples.push(Sample { offset_secs, mbps });
        }

        debug!(file = name, samples = samples.len(), "Parsed qperf file");
        Ok(Run {
            start_time,
            samples,
        })
    }
}

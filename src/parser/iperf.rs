//! iperf3 `--json` result files.

use serde::Deserialize;
use tracing::debug;

use super::RunParser;
use crate::error::ParseError;
use crate::model::{DataSource, Run, Sample};
use crate::timestamp::{parse_http_date, start_time_from_filename};

/// The subset of an iperf3 JSON report this tool reads.
#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    start: Option<Start>,
    intervals: Vec<Interval>,
}

#[derive(Debug, Deserialize)]
struct Start {
    #[serde(default)]
    timestamp: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct Timestamp {
    #[serde(default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Interval {
    sum: IntervalSum,
}

#[derive(Debug, Deserialize)]
struct IntervalSum {
    start: f64,
    bits_per_second: f64,
}

/// Parser for `*iperf3_throughput_<YYYYMMDD>_<HHMMSS>.json` files.
///
/// The start time always comes from the file name, which marks when the
/// capture actually began. The report's own `start.timestamp.time` is only
/// checked and logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IperfParser;

impl RunParser for IperfParser {
    fn parse(&self, name: &str, contents: &str) -> Result<Run, ParseError> {
        let report: Report = serde_json::from_str(contents).map_err(|source| ParseError::Json {
            file: name.to_string(),
            source,
        })?;

        let start_time = start_time_from_filename(name, DataSource::Iperf3.extension())?;

        match report
            .start
            .and_then(|s| s.timestamp)
            .and_then(|t| t.time)
        {
            Some(raw) => match parse_http_date(&raw) {
                Ok(reported) if reported != start_time => {
                    debug!(
                        file = name,
                        reported = %reported,
                        filename = %start_time,
                        "Report timestamp differs from file name, using file name"
                    );
                }
                Ok(_) => {}
                Err(e) => debug!(file = name, value = %raw, error = %e, "Unparseable report timestamp"),
            },
            None => debug!(file = name, "Report has no start timestamp"),
        }

        let mut samples = Vec::with_capacity(report.intervals.len());
        for interval in &report.intervals {
            let sum = &interval.sum;
            if !sum.start.is_finite() || sum.start < 0.0 {
                return Err(ParseError::Content {
                    file: name.to_string(),
                    reason: format!("interval start {}", sum.start),
                });
            }
            if !sum.bits_per_second.is_finite() || sum.bits_per_second < 0.0 {
                return Err(ParseError::Content {
                    file: name.to_string(),
                    reason: format!("bits_per_second {}", sum.bits_per_second),
                });
            }
            samples.push(Sample {
                offset_secs: sum.start.trunc() as u64,
                mbps: sum.bits_per_second / 1e6,
            });
        }

        debug!(file = name, samples = samples.len(), "Parsed iperf3 file");
        Ok(Run {
            start_time,
            samples,
        })
    }
}

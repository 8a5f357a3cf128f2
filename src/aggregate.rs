//! Groups throughput samples by interface and time of day.

use chrono::{NaiveDateTime, Timelike};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

use crate::error::ParseError;
use crate::model::{Interface, Run, TimeSection};
use crate::parser::RunParser;
use crate::source::ResultSource;

const SECONDS_PER_DAY: i64 = 86_400;

/// What to do with samples whose start time plus offset crosses midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MidnightPolicy {
    /// Keep the raw value; anything at or past 86400 matches no section and
    /// is dropped.
    #[default]
    Drop,
    /// Wrap modulo one day so late samples land in the early morning section.
    Wrap,
}

/// Accumulated throughput values per (interface, time section).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buckets {
    values: BTreeMap<(Interface, TimeSection), Vec<f64>>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interface: Interface, section: TimeSection, mbps: f64) {
        self.values.entry((interface, section)).or_default().push(mbps);
    }

    /// Values collected for a bucket; empty if nothing landed there.
    pub fn get(&self, interface: Interface, section: TimeSection) -> &[f64] {
        self.values
            .get(&(interface, section))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_samples(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    /// Adds every sample of `run` to the `interface` buckets.
    pub fn add_run(&mut self, interface: Interface, run: &Run, policy: MidnightPolicy) {
        for sample in &run.samples {
            let secs = seconds_since_midnight(&run.start_time, sample.offset_secs, policy);
            match get_time_section(secs) {
                Some(section) => self.push(interface, section, sample.mbps),
                None => debug!(
                    interface = %interface,
                    seconds_since_midnight = secs,
                    "Sample outside every time section, dropped"
                ),
            }
        }
    }
}

/// Seconds since the start time's midnight, plus `offset_secs`.
pub fn seconds_since_midnight(start: &NaiveDateTime, offset_secs: u64, policy: MidnightPolicy) -> i64 {
    let base = i64::from(start.num_seconds_from_midnight());
    let raw = base.saturating_add(i64::try_from(offset_secs).unwrap_or(i64::MAX));
    match policy {
        MidnightPolicy::Drop => raw,
        MidnightPolicy::Wrap => raw.rem_euclid(SECONDS_PER_DAY),
    }
}

/// Maps seconds since midnight to the first section containing it.
pub fn get_time_section(seconds_since_midnight: i64) -> Option<TimeSection> {
    TimeSection::ALL
        .into_iter()
        .find(|section| section.contains(seconds_since_midnight))
}

/// Parses every file in `source` whose name contains `file_filter` and
/// buckets the samples.
///
/// Failures never escape: an unlistable source yields empty buckets, and a
/// file that cannot be read or parsed contributes nothing.
#[tracing::instrument(skip(source, parser), fields(location = %source.location()))]
pub fn process_files<S, P>(
    source: &S,
    parser: &P,
    file_filter: &str,
    policy: MidnightPolicy,
) -> Buckets
where
    S: ResultSource + ?Sized,
    P: RunParser + ?Sized,
{
    let mut buckets = Buckets::new();

    let names = match source.list() {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Failed to list result directory");
            return buckets;
        }
    };

    let mut matched = 0usize;
    let mut skipped = 0usize;

    for name in names.iter().filter(|n| n.contains(file_filter)) {
        matched += 1;

        let run = source
            .read(name)
            .map_err(|source| ParseError::Read {
                file: name.clone(),
                source,
            })
            .and_then(|contents| parser.parse(name, &contents));

        let run = match run {
            Ok(run) => run,
            Err(e) => {
                warn!(file = %name, error = %e, "Skipping result file");
                skipped += 1;
                continue;
            }
        };

        let Some(interface) = Interface::from_filename(name) else {
            debug!(file = %name, "No known interface in file name, skipping");
            skipped += 1;
            continue;
        };

        buckets.add_run(interface, &run, policy);
    }

    info!(
        files_matched = matched,
        files_parsed = matched - skipped,
        files_skipped = skipped,
        samples = buckets.total_samples(),
        "Processed result files"
    );

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sample;
    use crate::parser::{IperfParser, QperfParser};
    use crate::source::{DirSource, MemorySource};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_get_time_section_boundaries() {
        assert_eq!(get_time_section(0), Some(TimeSection::Night));
        assert_eq!(get_time_section(21_599), Some(TimeSection::Night));
        assert_eq!(get_time_section(21_600), Some(TimeSection::Morning));
        assert_eq!(get_time_section(43_200), Some(TimeSection::Afternoon));
        assert_eq!(get_time_section(64_800), Some(TimeSection::Evening));
        assert_eq!(get_time_section(86_399), Some(TimeSection::Evening));
    }

    #[test]
    fn test_get_time_section_out_of_range() {
        assert_eq!(get_time_section(86_400), None);
        assert_eq!(get_time_section(100_000), None);
        assert_eq!(get_time_section(-1), None);
    }

    #[test]
    fn test_seconds_since_midnight_no_wrap() {
        let secs = seconds_since_midnight(&at(23, 59, 50), 20, MidnightPolicy::Drop);
        assert_eq!(secs, 86_410);
        assert_eq!(get_time_section(secs), None);
    }

    #[test]
    fn test_seconds_since_midnight_wrap() {
        let secs = seconds_since_midnight(&at(23, 59, 50), 20, MidnightPolicy::Wrap);
        assert_eq!(secs, 10);
        assert_eq!(get_time_section(secs), Some(TimeSection::Night));
    }

    #[test]
    fn test_add_run_drops_past_midnight() {
        let run = Run {
            start_time: at(23, 59, 50),
            samples: vec![
                Sample { offset_secs: 0, mbps: 10.0 },
                Sample { offset_secs: 20, mbps: 20.0 },
            ],
        };
        let mut buckets = Buckets::new();
        buckets.add_run(Interface::Wlan1, &run, MidnightPolicy::Drop);

        assert_eq!(buckets.get(Interface::Wlan1, TimeSection::Evening), &[10.0]);
        assert!(buckets.get(Interface::Wlan1, TimeSection::Night).is_empty());
        assert_eq!(buckets.total_samples(), 1);
    }

    #[test]
    fn test_process_qperf_files() {
        let source = MemorySource::new().with_file(
            "wlan0_qperf_throughput_rtt_20250605_000000.txt",
            "second 0: 50.0 mbit/s\nsecond 5: 60.0 mbit/s\n",
        );
        let buckets = process_files(&source, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);

        assert_eq!(buckets.get(Interface::Wlan0, TimeSection::Night), &[50.0, 60.0]);
        assert_eq!(buckets.total_samples(), 2);
    }

    #[test]
    fn test_process_iperf_files() {
        let source = MemorySource::new().with_file(
            "wlan1_iperf3_throughput_20250605_120000.json",
            r#"{"intervals": [{"sum": {"start": 0, "bits_per_second": 100000000}}]}"#,
        );
        let buckets = process_files(&source, &IperfParser, "iperf3_throughput", MidnightPolicy::Drop);

        assert_eq!(buckets.get(Interface::Wlan1, TimeSection::Afternoon), &[100.0]);
    }

    #[test]
    fn test_unknown_interface_contributes_nothing() {
        let source = MemorySource::new().with_file(
            "eth0_qperf_throughput_rtt_20250605_000000.txt",
            "second 0: 50.0 mbit/s\n",
        );
        let buckets = process_files(&source, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);
        assert_eq!(buckets, Buckets::new());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        // A directory matching the filter lists fine but cannot be read as a file.
        std::fs::create_dir(dir.path().join("wlan0_qperf_throughput_rtt_20250605_000000.txt")).unwrap();
        std::fs::write(
            dir.path().join("wlan1_qperf_throughput_rtt_20250605_060000.txt"),
            "second 0: 42.0 mbit/s\n",
        )
        .unwrap();

        let source = DirSource::new(dir.path());
        let buckets = process_files(&source, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);

        assert_eq!(buckets.get(Interface::Wlan1, TimeSection::Morning), &[42.0]);
        assert!(buckets.get(Interface::Wlan0, TimeSection::Night).is_empty());
        assert_eq!(buckets.total_samples(), 1);
    }

    #[test]
    fn test_missing_listed_file_is_skipped() {
        struct Vanishing;

        impl ResultSource for Vanishing {
            fn location(&self) -> String {
                "<vanishing>".to_string()
            }

            fn list(&self) -> std::io::Result<Vec<String>> {
                Ok(vec!["wlan0_qperf_throughput_rtt_20250605_000000.txt".to_string()])
            }

            fn read(&self, _name: &str) -> std::io::Result<String> {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            }
        }

        let buckets = process_files(&Vanishing, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);
        assert_eq!(buckets, Buckets::new());
    }

    #[test]
    fn test_leap_second_filename_contributes_nothing() {
        let source = MemorySource::new().with_file(
            "wlan0_qperf_throughput_rtt_20250605_055960.txt",
            "second 0: 1.0 mbit/s\n",
        );
        let buckets = process_files(&source, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);
        assert_eq!(buckets, Buckets::new());
    }

    #[test]
    fn test_filter_and_bad_files_are_skipped() {
        let source = MemorySource::new()
            .with_file("wlan0_qperf_throughput_rtt_20250605_060000.txt", "second 1: 10.0 mbit/s\n")
            .with_file("wlan0_qperf_throughput_rtt_20250605_990000.txt", "second 1: 99.0 mbit/s\n")
            .with_file("wlan0_qperf_latency_20250605_060000.txt", "second 1: 77.0 mbit/s\n")
            .with_file("wlan0_qperf_throughput_rtt_20250605_070000.txt", "second 1: x.y.z mbit/s\n");
        let buckets = process_files(&source, &QperfParser, "qperf_throughput_rtt", MidnightPolicy::Drop);

        assert_eq!(buckets.get(Interface::Wlan0, TimeSection::Morning), &[10.0]);
        assert_eq!(buckets.total_samples(), 1);
    }
}

//! Core data types shared by the parsers, the aggregator and the reporters.

use chrono::NaiveDateTime;
use std::fmt;

/// Network interface a measurement was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interface {
    Wlan0,
    Wlan1,
}

impl Interface {
    pub const ALL: [Interface; 2] = [Interface::Wlan0, Interface::Wlan1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interface::Wlan0 => "wlan0",
            Interface::Wlan1 => "wlan1",
        }
    }

    /// Determines the interface from a result file name.
    ///
    /// `wlan0` is checked first, so a name containing both resolves to
    /// [`Interface::Wlan0`].
    pub fn from_filename(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|iface| name.contains(iface.as_str()))
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four fixed six-hour windows of the day.
///
/// | Label       | Seconds since midnight |
/// |-------------|------------------------|
/// | `0h-5h59`   | 0 ..= 21599            |
/// | `6h-11h59`  | 21600 ..= 43199        |
/// | `12h-17h59` | 43200 ..= 64799        |
/// | `18h-23h59` | 64800 ..= 86399        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSection {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeSection {
    /// Declaration order, which is also report row order.
    pub const ALL: [TimeSection; 4] = [
        TimeSection::Night,
        TimeSection::Morning,
        TimeSection::Afternoon,
        TimeSection::Evening,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSection::Night => "0h-5h59",
            TimeSection::Morning => "6h-11h59",
            TimeSection::Afternoon => "12h-17h59",
            TimeSection::Evening => "18h-23h59",
        }
    }

    /// Inclusive `(start, end)` bounds in seconds since midnight.
    pub fn bounds(&self) -> (i64, i64) {
        const HOUR: i64 = 3600;
        match self {
            TimeSection::Night => (0, 6 * HOUR - 1),
            TimeSection::Morning => (6 * HOUR, 12 * HOUR - 1),
            TimeSection::Afternoon => (12 * HOUR, 18 * HOUR - 1),
            TimeSection::Evening => (18 * HOUR, 24 * HOUR - 1),
        }
    }

    pub fn contains(&self, seconds_since_midnight: i64) -> bool {
        let (start, end) = self.bounds();
        (start..=end).contains(&seconds_since_midnight)
    }
}

impl fmt::Display for TimeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single throughput observation within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Whole seconds since the run started.
    pub offset_secs: u64,
    pub mbps: f64,
}

/// A parsed result file.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub start_time: NaiveDateTime,
    pub samples: Vec<Sample>,
}

/// Benchmarking tool that produced a set of result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Qperf,
    Iperf3,
}

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::Qperf => "qperf",
            DataSource::Iperf3 => "iperf3",
        }
    }

    /// Substring a file name must contain to be picked up for this source.
    pub fn file_filter(&self) -> &'static str {
        match self {
            DataSource::Qperf => "qperf_throughput_rtt",
            DataSource::Iperf3 => "iperf3_throughput",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DataSource::Qperf => ".txt",
            DataSource::Iperf3 => ".json",
        }
    }
}

//! Report rendering: a fixed-width console table and a CSV file.
//!
//! Both reporters consume the same [`SectionRow`]s, so the two outputs always
//! agree cell for cell.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::aggregate::Buckets;
use crate::model::{Interface, TimeSection};
use crate::stats::calc_stats;

pub const TABLE_TITLE: &str = "WiFi Throughput Statistics (Mbps)";

const TABLE_HEADER: &str =
    "Time Section   | wlan0 qperf      | wlan1 qperf      | wlan0 iperf3     | wlan1 iperf3     ";

const SECTION_WIDTH: usize = 14;
const CELL_WIDTH: usize = 16;
const RULE_WIDTH: usize = 80;

/// One report row: a time section and its four `mean ± stddev` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRow {
    #[serde(rename = "Time Section")]
    pub section: String,
    #[serde(rename = "wlan0 qperf (Mbps)")]
    pub wlan0_qperf: String,
    #[serde(rename = "wlan1 qperf (Mbps)")]
    pub wlan1_qperf: String,
    #[serde(rename = "wlan0 iperf3 (Mbps)")]
    pub wlan0_iperf: String,
    #[serde(rename = "wlan1 iperf3 (Mbps)")]
    pub wlan1_iperf: String,
}

impl SectionRow {
    fn cells(&self) -> [&str; 4] {
        [
            self.wlan0_qperf.as_str(),
            self.wlan1_qperf.as_str(),
            self.wlan0_iperf.as_str(),
            self.wlan1_iperf.as_str(),
        ]
    }
}

/// Reduces both sources to one row per time section, in declaration order.
pub fn summarize(qperf: &Buckets, iperf: &Buckets) -> Vec<SectionRow> {
    TimeSection::ALL
        .iter()
        .map(|&section| SectionRow {
            section: section.label().to_string(),
            wlan0_qperf: calc_stats(qperf.get(Interface::Wlan0, section)),
            wlan1_qperf: calc_stats(qperf.get(Interface::Wlan1, section)),
            wlan0_iperf: calc_stats(iperf.get(Interface::Wlan0, section)),
            wlan1_iperf: calc_stats(iperf.get(Interface::Wlan1, section)),
        })
        .collect()
}

/// Renders the rows as the fixed-width console table, title included.
pub fn render_table(rows: &[SectionRow]) -> String {
    let mut out = format!("\n{TABLE_TITLE}:\n{TABLE_HEADER}\n{}\n", "-".repeat(RULE_WIDTH));
    for row in rows {
        let [w0_q, w1_q, w0_i, w1_i] = row.cells();
        out.push_str(&format!(
            "{:<SECTION_WIDTH$} | {w0_q:^CELL_WIDTH$} | {w1_q:^CELL_WIDTH$} | {w0_i:^CELL_WIDTH$} | {w1_i:^CELL_WIDTH$}\n",
            row.section
        ));
    }
    out
}

/// Prints the table to stdout.
pub fn print_table(rows: &[SectionRow]) {
    print!("{}", render_table(rows));
}

/// Writes the rows to `path` as CSV, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[SectionRow]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV report");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

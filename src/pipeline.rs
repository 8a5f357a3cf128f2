//! End-to-end report generation: discover, parse, aggregate, report.

use tracing::{error, info, info_span};

use crate::aggregate::{Buckets, process_files};
use crate::config::Config;
use crate::model::DataSource;
use crate::output::{SectionRow, print_table, summarize, write_csv};
use crate::parser::{IperfParser, QperfParser};
use crate::source::{DirSource, ResultSource};

/// Aggregates both sources. Returns `(qperf, iperf3)` buckets.
pub fn collect<Q, I>(qperf: &Q, iperf: &I, config: &Config) -> (Buckets, Buckets)
where
    Q: ResultSource + ?Sized,
    I: ResultSource + ?Sized,
{
    let qperf_buckets = {
        let _span = info_span!("collect", source = DataSource::Qperf.name()).entered();
        process_files(
            qperf,
            &QperfParser,
            DataSource::Qperf.file_filter(),
            config.midnight,
        )
    };
    let iperf_buckets = {
        let _span = info_span!("collect", source = DataSource::Iperf3.name()).entered();
        process_files(
            iperf,
            &IperfParser,
            DataSource::Iperf3.file_filter(),
            config.midnight,
        )
    };
    (qperf_buckets, iperf_buckets)
}

/// Runs the whole report against the directories in `config`.
///
/// Prints the table, then writes the CSV. A CSV failure is logged and does
/// not affect the table. Returns the rows both reporters rendered.
#[tracing::instrument(skip_all, fields(output = %config.output_csv.display()))]
pub fn run(config: &Config) -> Vec<SectionRow> {
    let qperf = DirSource::new(&config.qperf_dir);
    let iperf = DirSource::new(&config.iperf_dir);

    let (qperf_buckets, iperf_buckets) = collect(&qperf, &iperf, config);
    let rows = summarize(&qperf_buckets, &iperf_buckets);

    print_table(&rows);

    match write_csv(&config.output_csv, &rows) {
        Ok(()) => {
            println!("\nResults saved to {}", config.output_csv.display());
            info!("CSV report written");
        }
        Err(e) => error!(error = %format!("{e:#}"), "Error saving to CSV"),
    }

    rows
}

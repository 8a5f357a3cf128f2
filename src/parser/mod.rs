//! Result file parsers.
//!
//! Each benchmarking tool has its own output format; both are turned into a
//! [`Run`] through the [`RunParser`] trait.

mod iperf;
mod qperf;

pub use iperf::IperfParser;
pub use qperf::QperfParser;

use crate::error::ParseError;
use crate::model::Run;

/// Converts the contents of one result file into a [`Run`].
pub trait RunParser {
    /// Parses `contents`, read from the file called `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file name carries no usable timestamp
    /// or the contents are malformed. Callers treat this as "no samples".
    fn parse(&self, name: &str, contents: &str) -> Result<Run, ParseError>;
}

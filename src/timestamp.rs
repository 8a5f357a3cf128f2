//! Timestamp extraction for result files.
//!
//! Both tools name their output `<...>_<YYYYMMDD>_<HHMMSS><ext>`; the last two
//! underscore-delimited tokens carry the run start time.

use chrono::{NaiveDateTime, Timelike};

use crate::error::ParseError;

const FILENAME_FORMAT: &str = "%Y%m%d_%H%M%S";
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parses the run start time out of a result file name.
///
/// `extension` (including the leading dot) is stripped before splitting. A
/// name without it is still split as-is, which will normally fail to parse.
///
/// # Errors
///
/// Returns [`ParseError::FilenameTimestamp`] if the name has fewer than three
/// underscore-delimited tokens or the last two do not form a valid
/// `YYYYMMDD_HHMMSS` timestamp.
pub fn start_time_from_filename(name: &str, extension: &str) -> Result<NaiveDateTime, ParseError> {
    let stem = name.strip_suffix(extension).unwrap_or(name);
    let mut tokens = stem.rsplitn(3, '_');

    let (Some(time), Some(date), Some(_)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseError::FilenameTimestamp {
            file: name.to_string(),
            reason: "expected <prefix>_<YYYYMMDD>_<HHMMSS>".to_string(),
        });
    };

    let ts = NaiveDateTime::parse_from_str(&format!("{date}_{time}"), FILENAME_FORMAT).map_err(
        |e| ParseError::FilenameTimestamp {
            file: name.to_string(),
            reason: format!("{date}_{time}: {e}"),
        },
    )?;

    // chrono reads second 60 as a leap second; result files never carry one.
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::FilenameTimestamp {
            file: name.to_string(),
            reason: format!("{date}_{time}: second out of range"),
        });
    }

    Ok(ts)
}

/// Parses an iperf3 `start.timestamp.time` value such as
/// `Thu, 05 Jun 2025 03:55:48 GMT`.
pub fn parse_http_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
}

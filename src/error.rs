//! Per-file failure taxonomy.
//!
//! Every variant is recoverable: the aggregator logs it and moves on to the
//! next file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad timestamp in file name {file}: {reason}")]
    FilenameTimestamp { file: String, reason: String },

    #[error("malformed content in {file}: {reason}")]
    Content { file: String, reason: String },

    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

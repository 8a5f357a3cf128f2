pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod stats;
pub mod timestamp;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {reason}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Failed to parse archive response as JSON")]
    JsonParse(#[from] serde_json::Error),

    #[error("Archive response has no '{0}' entry")]
    MissingKey(String),

    #[error("Archive response entry '{key}' is not {expected}")]
    UnexpectedShape { key: String, expected: &'static str },

    #[error("Timestamp and value arrays differ in length ({times} timestamps, {values} values)")]
    LengthMismatch { times: usize, values: usize },

    #[error("Failed to parse timestamp '{0}'")]
    TimestampParse(String, #[source] chrono::ParseError),

    #[error("Failed to create raw data directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write raw response to '{0}'")]
    RawDumpWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read raw response from '{0}'")]
    RawDumpRead(PathBuf, #[source] std::io::Error),
}

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort an audit run
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to connect to WebDriver at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single page could not be checked. Never fatal: the URL is skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("navigation timed out after {0:?}")]
    Timeout(Duration),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),
}

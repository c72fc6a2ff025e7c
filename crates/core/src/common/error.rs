//! Error definitions.
//!
//! Accounting itself never fails: zero denominators surface as
//! [`Metric::UNDEFINED`](super::Metric::UNDEFINED). Errors only come from the
//! edges of the crate:
//! 1. **Report Output:** Opening, encoding, or writing `hw_stats.json`.
//! 2. **Configuration:** Parsing JSON configuration and validating the profiling window.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by report writing and configuration.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The report destination could not be created or written.
    #[error("failed to write report '{}': {source}", path.display())]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the report to a caller-supplied stream failed.
    #[error("failed to write report stream: {0}")]
    Stream(#[from] io::Error),

    /// The report could not be encoded or decoded as JSON.
    #[error("report encoding failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The configuration document is malformed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// The profiling window stops before it starts.
    #[error("profiling window stop {stop:#x} precedes start {start:#x}")]
    InvalidWindow {
        /// First PC of the window.
        start: u32,
        /// Last PC of the window.
        stop: u32,
    },
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, StatsError>;

//! Error types for gitreport-tasks

use std::path::PathBuf;

use chrono::NaiveDate;
use gitreport_git::GitError;
use thiserror::Error;

/// Errors that can occur while computing periods or persisting reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error reading or writing a report file
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error serializing or parsing report JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A period offset moved the window outside the supported calendar
    #[error("Report period out of range: {offset} {unit} before {today}")]
    PeriodOutOfRange {
        /// Day the offset was applied to
        today: NaiveDate,
        /// Requested offset
        offset: u32,
        /// Offset unit (days, weeks or months)
        unit: &'static str,
    },

    /// The computed window was invalid
    #[error(transparent)]
    Window(#[from] GitError),
}

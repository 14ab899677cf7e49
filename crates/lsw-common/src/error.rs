//! Error types for Logsweep.

use thiserror::Error;

/// Result type alias for Logsweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Logsweep.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Query errors (20-29)
    #[error("job submission failed for window [{start}, {end}): {reason}")]
    Submit {
        start: i64,
        end: i64,
        reason: String,
    },

    #[error("polling job {job_id} failed: {reason}")]
    Poll { job_id: String, reason: String },

    #[error("job {job_id} still partial after {polls} polls")]
    PollBudgetExceeded { job_id: String, polls: usize },

    #[error("malformed response from query service: {0}")]
    MalformedResponse(String),

    // Export errors (30-39)
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for stable error reporting in logs and diagnostics.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::Submit { .. } => 20,
            Error::Poll { .. } => 21,
            Error::PollBudgetExceeded { .. } => 22,
            Error::MalformedResponse(_) => 23,
            Error::Csv(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

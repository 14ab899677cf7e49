//! Exit codes for the logsweep CLI.
//!
//! Exit codes communicate run outcome without requiring output parsing.
//! Per-window failures do not affect the exit code; only setup-stage
//! failures (config, output file) are fatal.

use lsw_common::Error;

/// Exit codes for logsweep runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed (possibly with skipped windows).
    Clean = 0,

    /// Configuration unreadable or invalid.
    ConfigError = 10,

    /// Output file could not be created or written.
    IoError = 13,

    /// Internal/unknown error.
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a run-level error to its exit code.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io(_) | Error::Csv(_) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

//! Command-line interface.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use lsw_common::OutputFormat;

use crate::query::DEFAULT_MAX_POLLS;
use crate::run::RunOptions;

/// Windowed log-search export tool.
#[derive(Parser, Debug)]
#[command(name = "logsweep", version, about)]
pub struct Cli {
    /// Config file path (JSON).
    #[arg(
        short = 'c',
        long = "config",
        default_value = "search.conf",
        env = "LOGSWEEP_CONFIG"
    )]
    pub config: PathBuf,

    /// Time duration to look back from the end time, in minutes.
    #[arg(short = 'd', long = "duration", default_value_t = 15)]
    pub duration: i64,

    /// Query string, in the service's query language.
    #[arg(short = 'q', long = "query", default_value = "*")]
    pub query: String,

    /// End time as Unix seconds. Defaults to now.
    #[arg(short = 't', long = "end-time")]
    pub end_time: Option<i64>,

    /// Output file path. Defaults to a generated filename in CSV mode;
    /// omitted in JSON mode, output goes to the log stream.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Poll budget per window before a job is abandoned as stuck.
    #[arg(long = "max-polls", default_value_t = DEFAULT_MAX_POLLS)]
    pub max_polls: usize,
}

impl Cli {
    /// Resolve CLI flags into run options, filling in the current time.
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            query: self.query,
            end_time: self.end_time.unwrap_or_else(|| Utc::now().timestamp()),
            duration_minutes: self.duration,
            format: self.format,
            output: self.output,
            max_polls: self.max_polls,
        }
    }
}

//! Logsweep core: time-range windowing, query-job polling, and run
//! orchestration over the export layer.

pub mod cli;
pub mod client;
pub mod exit_codes;
pub mod query;
pub mod run;
pub mod window;

pub use cli::Cli;
pub use client::HttpQueryService;
pub use exit_codes::ExitCode;
pub use query::{drain_job, JobId, PollPage, QueryRequest, QueryService, DEFAULT_MAX_POLLS};
pub use run::{default_output_path, run, RunOptions, RunSummary};
pub use window::{plan_windows, Window};

//! Run orchestration: windows in, output file out.
//!
//! Strictly sequential. Each window is submitted and drained before the next
//! one starts; the only state crossing window boundaries is the open CSV
//! exporter (with its header-once schema) or the accumulated JSON batch.
//! A failed window is logged and skipped: partial results beat all-or-nothing.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::{error, info, warn};

use lsw_common::{Error, OutputFormat, Result};
use lsw_config::SearchConfig;
use lsw_export::{write_json_pretty, CsvExporter, Record};

use crate::query::{drain_job, QueryRequest, QueryService};
use crate::window::{plan_windows, Window};

/// Per-run parameters resolved from the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub query: String,
    /// End of the requested range, Unix seconds.
    pub end_time: i64,
    /// How far to look back from `end_time`, in minutes.
    pub duration_minutes: i64,
    pub format: OutputFormat,
    /// Output path. `None` means a generated filename in CSV mode, or
    /// log-stream output in JSON mode.
    pub output: Option<PathBuf>,
    /// Poll budget per window.
    pub max_polls: usize,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub windows: usize,
    pub windows_failed: usize,
    pub records: usize,
    pub output: Option<PathBuf>,
}

/// Generated output filename for runs without an explicit `-o`.
pub fn default_output_path(end_time: i64, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("logsweep-{end_time}.{}", format.extension()))
}

/// Execute one run: window the range, query each window, serialize hits.
pub fn run(
    config: &SearchConfig,
    service: &dyn QueryService,
    options: &RunOptions,
) -> Result<RunSummary> {
    // An absurd duration would either wrap or plan an astronomical number of
    // windows; treat it as a setup error rather than saturating silently.
    let start = options
        .duration_minutes
        .checked_mul(60)
        .and_then(|secs| options.end_time.checked_sub(secs))
        .ok_or_else(|| {
            Error::Config(format!(
                "duration of {} minutes overflows the time range",
                options.duration_minutes
            ))
        })?;
    let windows = plan_windows(start, options.end_time, config.step);
    info!(
        windows = windows.len(),
        start,
        end = options.end_time,
        step_minutes = config.step,
        "planned query windows"
    );

    let summary = match options.format {
        OutputFormat::Csv => run_csv(config, service, options, &windows)?,
        OutputFormat::Json => run_json(config, service, options, &windows)?,
    };

    info!(
        windows = summary.windows,
        failed = summary.windows_failed,
        records = summary.records,
        output = ?summary.output,
        "run complete"
    );
    Ok(summary)
}

fn run_csv(
    config: &SearchConfig,
    service: &dyn QueryService,
    options: &RunOptions,
    windows: &[Window],
) -> Result<RunSummary> {
    let path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(options.end_time, OutputFormat::Csv));
    let file = File::create(&path)?;
    let mut exporter = CsvExporter::new(BufWriter::new(file));

    let mut records = 0;
    let mut failed = 0;
    for window in windows {
        match query_window(config, service, options, *window) {
            Some(hits) => records += exporter.write_batch(&hits)?,
            None => failed += 1,
        }
    }

    Ok(RunSummary {
        windows: windows.len(),
        windows_failed: failed,
        records,
        output: Some(path),
    })
}

fn run_json(
    config: &SearchConfig,
    service: &dyn QueryService,
    options: &RunOptions,
    windows: &[Window],
) -> Result<RunSummary> {
    let mut batch: Vec<Record> = Vec::new();
    let mut failed = 0;
    for window in windows {
        match query_window(config, service, options, *window) {
            Some(hits) => batch.extend(hits),
            None => failed += 1,
        }
    }

    let written = match &options.output {
        Some(path) => {
            let file = File::create(path)?;
            match write_json_pretty(&batch, BufWriter::new(file)) {
                Ok(()) => Some(path.clone()),
                Err(err) => {
                    // Serialization failure drops the output but not the run.
                    error!(%err, "JSON serialization failed, nothing written");
                    None
                }
            }
        }
        None => {
            match serde_json::to_string_pretty(&batch) {
                Ok(json) => info!(records = batch.len(), "{json}"),
                Err(err) => error!(%err, "JSON serialization failed, nothing written"),
            }
            None
        }
    };

    Ok(RunSummary {
        windows: windows.len(),
        windows_failed: failed,
        records: batch.len(),
        output: written,
    })
}

/// Query one window. Returns `None` when the window is abandoned.
fn query_window(
    config: &SearchConfig,
    service: &dyn QueryService,
    options: &RunOptions,
    window: Window,
) -> Option<Vec<Record>> {
    let request = QueryRequest {
        repo: config.repo.clone(),
        query: options.query.clone(),
        window,
        size: config.size,
        fields: config.fields.clone(),
    };

    let job = match service.submit(&request) {
        Ok(job) => job,
        Err(err) => {
            warn!(%window, %err, code = err.code(), "job submission failed, skipping window");
            return None;
        }
    };

    match drain_job(service, &job, options.max_polls) {
        Ok(hits) => {
            info!(%window, %job, hits = hits.len(), "window drained");
            Some(hits)
        }
        Err(err) => {
            warn!(%window, %err, code = err.code(), "polling gave up, skipping window");
            None
        }
    }
}

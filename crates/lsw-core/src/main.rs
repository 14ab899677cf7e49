//! logsweep: windowed queries against a hosted log-search service,
//! exported to CSV or JSON.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lsw_config::SearchConfig;
use lsw_core::{run, Cli, ExitCode, HttpQueryService};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(real_main());
}

fn real_main() -> i32 {
    let cli = Cli::parse();

    let config = match SearchConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, code = err.code(), "config load failed");
            return ExitCode::ConfigError.as_i32();
        }
    };

    let service = HttpQueryService::new(&config);
    let options = cli.into_options();

    match run(&config, &service, &options) {
        Ok(summary) => {
            info!(
                records = summary.records,
                windows = summary.windows,
                failed = summary.windows_failed,
                "logsweep finished"
            );
            ExitCode::Clean.as_i32()
        }
        Err(err) => {
            error!(%err, code = err.code(), "run failed");
            ExitCode::from_error(&err).as_i32()
        }
    }
}

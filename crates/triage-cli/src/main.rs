//! triage - command line client for the Triage malware sandbox.
//!
//! A thin wrapper over `triage-http`, for ad hoc lookups and windowed
//! searches from a shell.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{config as config_cmd, download, page, report, sample, search, upload};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Page(args) => page::run(args).await,
        Commands::Sample(args) => sample::run_sample(args).await,
        Commands::Samples(args) => sample::run_samples(args).await,
        Commands::Status(args) => sample::run_status(args).await,
        Commands::Events(args) => sample::run_events(args).await,
        Commands::Overview(args) => report::run_overview(args).await,
        Commands::Report(args) => report::run_report(args).await,
        Commands::StaticReport(args) => report::run_static_report(args).await,
        Commands::KernelLog(args) => report::run_kernel_log(args).await,
        Commands::Download(args) => download::run(args).await,
        Commands::Upload(args) => upload::run(args).await,
        Commands::Config(cmd) => config_cmd::handle(cmd),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

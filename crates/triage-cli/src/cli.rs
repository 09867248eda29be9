//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{config, download, page, report, sample, search, upload};

/// Command line client for the Triage malware sandbox.
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version = env!("TRIAGE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect every result completed inside a time window
    Search(search::SearchArgs),

    /// Fetch a single page of search results
    Page(page::PageArgs),

    /// Show a sample
    Sample(sample::SampleArgs),

    /// List the latest samples
    Samples(sample::SamplesArgs),

    /// Show the status of a sample
    Status(sample::StatusArgs),

    /// Show status events of a sample and its tasks
    Events(sample::EventsArgs),

    /// Show the overview report of a sample
    Overview(report::OverviewArgs),

    /// Show the behavioral report of a task
    Report(report::ReportArgs),

    /// Show the static report of a sample
    StaticReport(report::StaticReportArgs),

    /// Print the kernel monitor log of a task
    KernelLog(report::KernelLogArgs),

    /// Download a sample or a network capture
    Download(download::DownloadArgs),

    /// Submit a file for analysis
    Upload(upload::UploadArgs),

    /// Manage the stored API key and deployment
    Config(config::ConfigCommand),
}

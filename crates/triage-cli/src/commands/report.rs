//! Report command implementations.

use anyhow::{Context, Result};
use clap::Args;

use crate::{config, output};

#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Sample id
    pub sample: String,

    /// Print only the malware families named by the overview
    #[arg(long)]
    pub families: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Sample id
    pub sample: String,

    /// Task id, e.g. behavioral1
    pub task: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StaticReportArgs {
    /// Sample id
    pub sample: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct KernelLogArgs {
    /// Sample id
    pub sample: String,

    /// Task id
    pub task: String,
}

pub async fn run_overview(args: OverviewArgs) -> Result<()> {
    let api = config::client()?;

    let overview = api
        .get_overview(&args.sample)
        .await
        .context("Failed to get overview")?;

    if args.families {
        return output::emit(&overview.families(), args.pretty);
    }
    output::emit(&overview, args.pretty)
}

pub async fn run_report(args: ReportArgs) -> Result<()> {
    let api = config::client()?;

    let report = api
        .get_triage_report(&args.sample, &args.task)
        .await
        .context("Failed to get report")?;

    output::emit(&report, args.pretty)
}

pub async fn run_static_report(args: StaticReportArgs) -> Result<()> {
    let api = config::client()?;

    let report = api
        .get_static_report(&args.sample)
        .await
        .context("Failed to get static report")?;

    output::emit(&report, args.pretty)
}

pub async fn run_kernel_log(args: KernelLogArgs) -> Result<()> {
    let api = config::client()?;

    let log = api
        .kernel_monitor_log(&args.sample, &args.task)
        .await
        .context("Failed to get kernel monitor log")?;

    print!("{log}");

    Ok(())
}

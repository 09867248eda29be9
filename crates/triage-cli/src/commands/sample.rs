//! Sample lookup command implementations.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use triage_http::Subset;

use crate::{config, output};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Sample id, e.g. 240101-abcdef1234
    pub sample: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// List your own submissions instead of public ones
    #[arg(long)]
    pub owned: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Sample id
    pub sample: String,
}

#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Sample id
    pub sample: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run_sample(args: SampleArgs) -> Result<()> {
    let api = config::client()?;

    let sample = api
        .get_sample(&args.sample)
        .await
        .context("Failed to get sample")?;

    output::emit(&sample, args.pretty)
}

pub async fn run_samples(args: SamplesArgs) -> Result<()> {
    let api = config::client()?;
    let subset = if args.owned {
        Subset::Owned
    } else {
        Subset::Public
    };

    let list = api
        .list_samples(subset)
        .await
        .context("Failed to list samples")?;

    if list.samples.is_empty() {
        eprintln!("{}", "No samples found.".dimmed());
        return Ok(());
    }

    output::emit_all(&list.samples, args.pretty)
}

pub async fn run_status(args: StatusArgs) -> Result<()> {
    let api = config::client()?;

    let status = api
        .sample_status(&args.sample)
        .await
        .context("Failed to get sample status")?;

    output::field("Status", &status.status);

    Ok(())
}

pub async fn run_events(args: EventsArgs) -> Result<()> {
    let api = config::client()?;

    let events = api
        .sample_events(&args.sample)
        .await
        .context("Failed to get sample events")?;

    output::emit_all(&events, args.pretty)
}

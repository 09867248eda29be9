//! Download command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use crate::{config, output};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    /// The submitted file
    Sample,
    /// Network capture of a task, pcap format
    Pcap,
    /// Network capture of a task, pcapng format
    Pcapng,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Sample id
    pub sample: String,

    /// What to download
    #[arg(long, value_enum, default_value_t = Artifact::Sample)]
    pub artifact: Artifact,

    /// Task id (required for captures)
    #[arg(long)]
    pub task: Option<String>,

    /// File to write
    #[arg(short, long)]
    pub output: PathBuf,
}

pub async fn run(args: DownloadArgs) -> Result<()> {
    let api = config::client()?;

    let task = match (args.artifact, &args.task) {
        (Artifact::Sample, _) => None,
        (_, Some(task)) => Some(task.as_str()),
        (_, None) => bail!("--task is required for network captures"),
    };

    let bytes = match (args.artifact, task) {
        (Artifact::Pcap, Some(task)) => api.download_pcap(&args.sample, task).await,
        (Artifact::Pcapng, Some(task)) => api.download_pcapng(&args.sample, task).await,
        _ => api.download_sample(&args.sample).await,
    }
    .context("Download failed")?;

    tokio::fs::write(&args.output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    output::success(&format!(
        "Wrote {} bytes to {}",
        bytes.len(),
        args.output.display()
    ));

    Ok(())
}

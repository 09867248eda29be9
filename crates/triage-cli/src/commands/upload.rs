//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{config, output};

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to submit
    pub file: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: UploadArgs) -> Result<()> {
    let api = config::client()?;

    let result = api
        .upload_sample(&args.file)
        .await
        .with_context(|| format!("Failed to upload {}", args.file.display()))?;

    output::success(&format!("Submitted as {}", result.id));
    output::emit(&result, args.pretty)
}

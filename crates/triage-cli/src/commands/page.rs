//! Single search page command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use triage_core::search::MAX_PAGE_SIZE;

use super::QueryArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct PageArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Continuation token from a previous page
    #[arg(long)]
    pub offset: Option<String>,

    /// Results per page (clamped to 1..=200)
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    pub limit: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: PageArgs) -> Result<()> {
    let query = args.query.to_query()?;
    let api = config::client()?;

    let page = api
        .search_page(&query, args.offset.as_deref(), args.limit)
        .await
        .context("Failed to fetch search page")?;

    if page.is_exhausted() {
        eprintln!("{}", "No results.".dimmed());
        return Ok(());
    }

    output::emit_all(&page.entries, args.pretty)?;

    if !page.next_offset.is_empty() {
        eprintln!();
        eprintln!("{}: {}", "Next offset".dimmed(), page.next_offset);
    }

    Ok(())
}

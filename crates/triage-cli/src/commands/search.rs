//! Windowed search command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use tracing::warn;

use triage_core::search::{MAX_PAGE_SIZE, ScanPolicy, SearchWindow};
use triage_core::{FamilyCache, time};

use super::QueryArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Start of the window: RFC 3339, 'YYYY-MM-DD HH:MM[:SS]' or 'YYYY-MM-DD' (local time)
    #[arg(long)]
    pub earliest: String,

    /// End of the window, same formats (defaults to now)
    #[arg(long)]
    pub latest: Option<String>,

    /// Results per page (clamped to 1..=200)
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    pub limit: u32,

    /// Stop once a page lies entirely before the window (needs newest-first results)
    #[arg(long)]
    pub early_exit: bool,

    /// Print the malware families of the results instead of the results
    #[arg(long)]
    pub families: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: SearchArgs) -> Result<()> {
    let query = args.query.to_query()?;
    let earliest = time::parse_caller_time(&args.earliest).context("Invalid --earliest")?;
    let latest = match &args.latest {
        Some(latest) => time::parse_caller_time(latest).context("Invalid --latest")?,
        None => Utc::now(),
    };
    let window = SearchWindow::new(&earliest, &latest).context("Invalid time window")?;
    let policy = if args.early_exit {
        ScanPolicy::SortedEarlyExit
    } else {
        ScanPolicy::Exhaustive
    };

    let api = config::client()?;

    let entries = api
        .search_window(&query, &window, args.limit, policy)
        .await
        .context("Search failed")?;

    if args.families {
        let mut overviews = Vec::with_capacity(entries.len());
        for entry in &entries {
            match api.get_overview(&entry.id).await {
                Ok(overview) => overviews.push(overview),
                Err(e) => warn!(sample = %entry.id, error = %e, "Skipping sample without overview"),
            }
        }

        let mut cache = FamilyCache::new();
        cache.refresh(&overviews, Utc::now());
        output::emit(&cache.families(), args.pretty)?;
        output::note(&format!(
            "{} families across {} samples",
            cache.len(),
            overviews.len()
        ));
        return Ok(());
    }

    if entries.is_empty() {
        eprintln!("{}", "No results in window.".dimmed());
        return Ok(());
    }

    output::emit_all(&entries, args.pretty)?;
    output::note(&format!("{} results", entries.len()));

    Ok(())
}

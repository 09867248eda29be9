//! Subcommand implementations.

pub mod config;
pub mod download;
pub mod page;
pub mod report;
pub mod sample;
pub mod search;
pub mod upload;

use anyhow::{Context, Result};
use clap::Args;

use triage_core::SearchQuery;

/// The query of a search, given verbatim or as a family name.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct QueryArgs {
    /// Search expression, e.g. 'tag:ransomware'
    #[arg(long)]
    pub query: Option<String>,

    /// Malware family name, shorthand for --query family:<NAME>
    #[arg(long)]
    pub family: Option<String>,
}

impl QueryArgs {
    pub fn to_query(&self) -> Result<SearchQuery> {
        match (&self.query, &self.family) {
            (_, Some(family)) => SearchQuery::family(family).context("Invalid family name"),
            (Some(query), None) => SearchQuery::new(query.as_str()).context("Invalid query"),
            (None, None) => anyhow::bail!("Either --query or --family is required"),
        }
    }
}

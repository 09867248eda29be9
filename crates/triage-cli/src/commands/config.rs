//! Config subcommand implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use triage_core::{ApiUrl, Environment};

use crate::config::{self, Settings};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Store the API key and deployment
    Set(SetArgs),

    /// Display the effective configuration
    Show,

    /// Remove the stored configuration
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Hosted deployment: public, private, recorded-future, recorded-future-us
    #[arg(long, conflicts_with = "api_url")]
    pub environment: Option<String>,

    /// Custom API base URL
    #[arg(long)]
    pub api_url: Option<String>,
}

pub fn handle(cmd: ConfigCommand) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Set(args) => set(args),
        ConfigSubcommand::Show => show(),
        ConfigSubcommand::Clear => clear(),
    }
}

fn set(args: SetArgs) -> Result<()> {
    if args.api_key.is_none() && args.environment.is_none() && args.api_url.is_none() {
        bail!("Nothing to set. Pass --api-key, --environment or --api-url.");
    }

    let mut stored = config::load()?;

    if let Some(key) = args.api_key {
        stored.api_key = Some(key.trim().to_string());
    }
    if let Some(name) = args.environment {
        stored.environment = Some(name.parse::<Environment>().context("Invalid environment")?);
        stored.api_url = None;
    }
    if let Some(url) = args.api_url {
        stored.api_url = Some(ApiUrl::new(&url).context("Invalid API URL")?);
        stored.environment = None;
    }

    let path = config::save(&stored)?;

    output::success("Configuration saved");
    output::field("File", &path.display().to_string());

    Ok(())
}

fn show() -> Result<()> {
    let settings = Settings::resolve(config::load()?)?;

    let environment = settings
        .environment
        .map(|env| env.to_string())
        .unwrap_or_else(|| "custom".to_string());
    output::field("Environment", &environment);
    output::field("API URL", settings.base.as_str());
    output::field(
        "API key",
        if settings.key.is_some() { "set" } else { "not set" },
    );

    Ok(())
}

fn clear() -> Result<()> {
    if config::clear()? {
        output::success("Configuration removed");
    } else {
        output::note("No stored configuration.");
    }

    Ok(())
}

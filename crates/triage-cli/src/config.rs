//! Persistent configuration for the API key and deployment.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use triage_core::{ApiUrl, Environment};
use triage_http::{ApiKey, TriageApi};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Overrides the stored API key.
pub const ENV_API_KEY: &str = "TRIAGE_API_KEY";
/// Overrides the stored environment.
pub const ENV_ENVIRONMENT: &str = "TRIAGE_ENVIRONMENT";
/// Overrides the stored base URL.
pub const ENV_API_URL: &str = "TRIAGE_API_URL";

/// Stored configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<ApiUrl>,
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "triage").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("config.json"))
}

/// Load the stored configuration, or defaults if there is none.
pub fn load() -> Result<StoredConfig> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    serde_json::from_str(&json).context("Invalid config file")
}

/// Save the configuration to disk.
pub fn save(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    let json = serde_json::to_string_pretty(config)?;

    fs::write(&path, &json).context("Failed to write config file")?;

    // The file holds the API key.
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Remove the stored configuration.
pub fn clear() -> Result<bool> {
    let path = config_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove config file")?;
        return Ok(true);
    }

    Ok(false)
}

/// Settings after applying environment overrides.
#[derive(Debug)]
pub struct Settings {
    pub key: Option<ApiKey>,
    pub base: ApiUrl,
    pub environment: Option<Environment>,
}

impl Settings {
    /// Combine the stored configuration with environment variables.
    ///
    /// An explicit base URL wins over an environment name.
    pub fn resolve(stored: StoredConfig) -> Result<Self> {
        let key = std::env::var(ENV_API_KEY)
            .ok()
            .or(stored.api_key)
            .map(ApiKey::new)
            .filter(|key| !key.is_empty());

        let environment = match std::env::var(ENV_ENVIRONMENT) {
            Ok(name) => Some(
                name.parse::<Environment>()
                    .with_context(|| format!("Invalid {ENV_ENVIRONMENT}"))?,
            ),
            Err(_) => stored.environment,
        };

        let base = match std::env::var(ENV_API_URL) {
            Ok(url) => Some(ApiUrl::new(&url).with_context(|| format!("Invalid {ENV_API_URL}"))?),
            Err(_) => stored.api_url,
        };

        let (base, environment) = match base {
            Some(base) => (base, None),
            None => {
                let environment = environment.unwrap_or_default();
                (environment.api_url(), Some(environment))
            }
        };

        Ok(Self {
            key,
            base,
            environment,
        })
    }

    /// Build an API client, requiring a key.
    pub fn client(self) -> Result<TriageApi> {
        let Some(key) = self.key else {
            bail!("No API key configured. Run 'triage config set --api-key <KEY>' or set {ENV_API_KEY}.");
        };
        TriageApi::with_url(self.base, key).context("Failed to create API client")
    }
}

/// Load configuration and build a client.
pub fn client() -> Result<TriageApi> {
    Settings::resolve(load()?)?.client()
}

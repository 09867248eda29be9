//! Sandbox deployments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ApiUrl;
use crate::error::{Error, InvalidInputError};

/// A hosted deployment of the sandbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// The public cloud.
    #[default]
    Public,
    /// The private cloud.
    Private,
    /// Recorded Future Sandbox.
    RecordedFuture,
    /// Recorded Future Sandbox, US region.
    RecordedFutureUs,
}

impl Environment {
    /// All known environments.
    pub const ALL: [Environment; 4] = [
        Environment::Public,
        Environment::Private,
        Environment::RecordedFuture,
        Environment::RecordedFutureUs,
    ];

    /// Base URL of the API for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Public => "https://api.tria.ge/v0/",
            Environment::Private => "https://private.tria.ge/api/v0/",
            Environment::RecordedFuture => "https://sandbox.recordedfuture.com/api/v0/",
            Environment::RecordedFutureUs => "https://us.sandbox.recordedfuture.com/api/v0/",
        }
    }

    /// Base URL as a validated [`ApiUrl`].
    pub fn api_url(self) -> ApiUrl {
        // Static URLs above are valid by construction.
        ApiUrl::new(self.base_url()).unwrap_or_else(|_| unreachable!("invalid built-in URL"))
    }

    /// Name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Public => "public",
            Environment::Private => "private",
            Environment::RecordedFuture => "recorded-future",
            Environment::RecordedFutureUs => "recorded-future-us",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == wanted)
            .ok_or_else(|| {
                InvalidInputError::Environment {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

//! Search query type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A search expression in the service's query language.
///
/// The text is passed through verbatim; only blank queries are rejected.
///
/// # Example
///
/// ```
/// use triage_core::SearchQuery;
///
/// let query = SearchQuery::family("emotet").unwrap();
/// assert_eq!(query.as_str(), "family:emotet");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Create a query from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Query`] for empty or whitespace-only text.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidInputError::Query {
                value: s,
                reason: "query must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Query matching samples attributed to a malware family.
    pub fn family(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(InvalidInputError::Query {
                value: name.to_string(),
                reason: "family name must be a single non-empty word".to_string(),
            }
            .into());
        }
        Ok(Self(format!("family:{name}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SearchQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SearchQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SearchQuery::new(s).map_err(serde::de::Error::custom)
    }
}

//! API key.

use std::fmt;

/// A bearer key for the sandbox API.
///
/// # Security
///
/// The key is never shown in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// Returns the raw key.
    ///
    /// Use only when constructing the authorization header or saving
    /// configuration.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_value_in_debug() {
        let key = ApiKey::new("7a1f2c9d0e4b");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("7a1f"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(ApiKey::new(" abc\n").expose(), "abc");
        assert!(ApiKey::new("  ").is_empty());
    }
}

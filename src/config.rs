//! Truncation settings shared by the library, the controller and the CLI.

use crate::error::{Error, Result};

/// Preview length used when nothing else is configured.
pub const DEFAULT_WORD_LIMIT: usize = 100;

/// Suffix appended to the last retained word.
pub const DEFAULT_ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of words kept in a preview.
    pub word_limit: usize,
    pub ellipsis: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            word_limit: DEFAULT_WORD_LIMIT,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

impl Config {
    /// Build a config from a caller-supplied signed limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `word_limit` is negative.
    pub fn with_word_limit(word_limit: i64) -> Result<Self> {
        Ok(Config {
            word_limit: checked_limit(word_limit)?,
            ..Config::default()
        })
    }

    #[must_use]
    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }
}

pub(crate) fn checked_limit(word_limit: i64) -> Result<usize> {
    usize::try_from(word_limit).map_err(|_| {
        Error::InvalidArgument(format!("word limit must be non-negative, got {word_limit}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.word_limit, 100);
        assert_eq!(config.ellipsis, "...");
    }

    #[test]
    fn signed_limits() {
        assert_eq!(Config::with_word_limit(0).unwrap().word_limit, 0);
        assert_eq!(
            Config::with_word_limit(-1).unwrap_err(),
            Error::InvalidArgument("word limit must be non-negative, got -1".into())
        );
    }

    #[test]
    fn custom_ellipsis() {
        let config = Config::with_word_limit(5).unwrap().ellipsis(" …");
        assert_eq!(config.ellipsis, " …");
        assert_eq!(config.word_limit, 5);
    }
}

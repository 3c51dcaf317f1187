//! Service configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of posts returned by a plain feed request.
pub const DEFAULT_FEED_SIZE: usize = 10;

/// Number of posts per page of a paginated feed.
pub const DEFAULT_PAGE_SIZE: usize = 2;

/// Configuration for the [`NewsFeed`](crate::NewsFeed) service.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsFeedConfig {
    /// Posts returned by [`NewsFeed::feed`](crate::NewsFeed::feed).
    pub feed_size: usize,
    /// Posts per page for [`NewsFeed::feed_page`](crate::NewsFeed::feed_page).
    pub page_size: usize,
}

impl Default for NewsFeedConfig {
    fn default() -> Self {
        Self {
            feed_size: DEFAULT_FEED_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl NewsFeedConfig {
    /// Check the configuration for values the service cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NewsFeedConfig::default();
        assert_eq!(config.feed_size, 10);
        assert_eq!(config.page_size, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = NewsFeedConfig::from_json(r#"{"feed_size": 25}"#).unwrap();
        assert_eq!(config.feed_size, 25);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_json_rejects_zero_page_size() {
        let err = NewsFeedConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert_eq!(err, ConfigError::ZeroPageSize);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = NewsFeedConfig::from_json("feed_size = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_feed_size_is_allowed() {
        let config = NewsFeedConfig {
            feed_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

//! Client configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateOptions;
use crate::error::{FtSearchError, Result};
use crate::query::{DEFAULT_LIMIT, DEFAULT_OFFSET, Limit, QueryOptions};
use crate::serialize::DEFAULT_DIALECT;

/// Defaults applied to every request a client builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Query dialect sent with every request.
    pub dialect: u8,
    /// Number of records fetched per page.
    pub page_size: u64,
    /// Engine-side request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            dialect: DEFAULT_DIALECT,
            page_size: DEFAULT_LIMIT,
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)
            .map_err(|e| FtSearchError::config(format!("Failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: ClientConfig = serde_json::from_reader(reader)
            .map_err(|e| FtSearchError::config(format!("Failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(FtSearchError::config("page_size must be greater than 0"));
        }
        if self.dialect == 0 {
            return Err(FtSearchError::config("dialect must be greater than 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Search options seeded with the configured dialect, page size and
    /// timeout.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            dialect: self.dialect,
            limit: Limit::new(DEFAULT_OFFSET, self.page_size),
            timeout: self.timeout(),
            ..QueryOptions::default()
        }
    }

    /// Aggregate options seeded with the configured dialect and timeout.
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            dialect: self.dialect,
            timeout: self.timeout(),
            ..AggregateOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::ToArgs;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.dialect, 2);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_ms, None);
        assert!(config.validate().is_ok());

        // the defaults are the engine's, so nothing is sent
        assert!(config.query_options().to_args().is_empty());
        assert!(config.aggregate_options().to_args().is_empty());
    }

    #[test]
    fn test_partial_json() -> Result<()> {
        let config = ClientConfig::from_json_str(r#"{"page_size": 3, "timeout_ms": 250}"#)?;
        assert_eq!(config.dialect, 2);
        assert_eq!(config.page_size, 3);

        let options = config.query_options();
        assert_eq!(options.limit, Limit::new(0, 3));
        assert_eq!(options.timeout, Some(Duration::from_millis(250)));
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let err = ClientConfig::from_json_str(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, FtSearchError::Config(_)));

        let err = ClientConfig::from_json_str(r#"{"dialect": 0}"#).unwrap_err();
        assert!(matches!(err, FtSearchError::Config(_)));

        let err = ClientConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, FtSearchError::Config(_)));
    }
}

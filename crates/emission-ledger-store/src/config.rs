//! Store configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default database file name.
pub const DEFAULT_DB_PATH: &str = "emission_factors.db";

/// Default bound on a single store call (milliseconds).
pub const DEFAULT_ACCESS_TIMEOUT_MS: u64 = 30_000;

/// Where the repository lives and how long a call may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
    /// Upper bound on one store call, including waiting for locks held by
    /// other processes.
    pub access_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            access_timeout_ms: DEFAULT_ACCESS_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_access_timeout(mut self, timeout: Duration) -> Self {
        self.access_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn access_timeout(&self) -> Duration {
        Duration::from_millis(self.access_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("emission_factors.db"));
        assert_eq!(config.access_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"path": "/tmp/ef.db"}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/ef.db"));
        assert_eq!(config.access_timeout_ms, DEFAULT_ACCESS_TIMEOUT_MS);
    }

    #[test]
    fn test_with_access_timeout() {
        let config = StoreConfig::new("x.db").with_access_timeout(Duration::from_millis(250));
        assert_eq!(config.access_timeout_ms, 250);
    }
}

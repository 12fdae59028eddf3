//! View configuration.
//!
//! Read once at startup and handed to every screen when it is opened. Screens
//! never look preferences up on their own.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum number of items per home section.
    pub home_section_limit: usize,
    pub last_added_limit: usize,
    pub grid_suggestion_size: usize,
    pub smart_mix_size: usize,
    /// Column count of the suggestion grid, forwarded to the presentation layer.
    pub grid_columns: usize,
    pub notice_ttl_secs: u64,
    /// Seed for suggestion sampling; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            home_section_limit: 10,
            last_added_limit: 20,
            grid_suggestion_size: 8,
            smart_mix_size: 20,
            grid_columns: 2,
            notice_ttl_secs: 5,
            rng_seed: None,
        }
    }
}

impl ViewConfig {
    /// Load from a JSON file. A missing file yields the defaults; missing fields
    /// fall back to their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ViewConfig = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.notice_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        std::fs::write(&path, r#"{ "smart_mix_size": 30, "rng_seed": 9 }"#).unwrap();

        let config = ViewConfig::load(&path).unwrap();
        assert_eq!(config.smart_mix_size, 30);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.grid_suggestion_size, 8);
        assert_eq!(config.home_section_limit, 10);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ViewConfig::load(&path).is_err());
    }
}

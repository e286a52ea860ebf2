//! Configuration loading and parsing for `licensaurus.toml` files.
use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

use crate::{
    Result, remote::github::DEFAULT_GITHUB_API_URL,
    resolver::DEFAULT_CONCURRENCY,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "licensaurus.toml";

/// Root configuration structure for `licensaurus.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Directory holding previously downloaded licenses, one subdirectory
    /// per dependency. Setting it disables remote lookups for dependencies
    /// missing from the cache.
    pub cache_dir: Option<PathBuf>,
    /// Maximum number of licenses resolved concurrently.
    pub concurrency: usize,
    /// GitHub API base URL, for GitHub Enterprise installations.
    pub github_api_url: String,
    /// Display names keyed by repository name.
    #[serde(rename = "rename")]
    pub renames: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: None,
            concurrency: DEFAULT_CONCURRENCY,
            github_api_url: DEFAULT_GITHUB_API_URL.into(),
            renames: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

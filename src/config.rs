use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::feed::{DEFAULT_RESOLVE_CONCURRENCY, PAGE_SIZES};

const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub graphql_url: Option<String>,
    /// Name resolution is disabled when unset
    pub rpc_url: Option<String>,
    pub reverse_resolver: Option<String>,
    pub rainbow_table: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_resolve_concurrency")]
    pub resolve_concurrency: usize,
    #[serde(default)]
    pub recent_searches: Vec<String>,
}

fn default_page_size() -> u32 {
    PAGE_SIZES[0]
}

fn default_resolve_concurrency() -> usize {
    DEFAULT_RESOLVE_CONCURRENCY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: None,
            rpc_url: None,
            reverse_resolver: None,
            rainbow_table: None,
            page_size: default_page_size(),
            resolve_concurrency: default_resolve_concurrency(),
            recent_searches: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the config directory path (~/.config/txfeed on Linux)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("txfeed"))
            .context("Could not determine config directory")
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {path:?}"))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents).context("Failed to parse config file")?;
        if !PAGE_SIZES.contains(&config.page_size) {
            config.page_size = default_page_size();
        }
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {dir:?}"))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        Ok(())
    }

    /// Set the indexer endpoint and persist
    pub fn set_graphql(&mut self, url: String) -> Result<()> {
        self.graphql_url = Some(url);
        self.save()
    }

    /// RPC endpoint, reverse resolver and rainbow table, when all three are set
    pub fn resolver_settings(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.rpc_url.as_deref()?,
            self.reverse_resolver.as_deref()?,
            self.rainbow_table.as_deref()?,
        ))
    }

    /// Move `query` to the front of the history without persisting
    pub fn push_recent(&mut self, query: String) {
        self.recent_searches.retain(|s| s != &query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    /// Add a search to recent history (keeps last 10) and persist
    pub fn add_recent_search(&mut self, query: String) -> Result<()> {
        self.push_recent(query);
        self.save()
    }
}

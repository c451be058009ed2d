//! Router configuration, optionally read from the `[router]` table of a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a wildcard segment treats the rest of the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardMode {
    /// A `*` node with a handler absorbs every remaining segment when
    /// nothing below it matches: `/order/*` matches `/order/delete/123`
    #[default]
    Absorb,
    /// A `*` stands for exactly one segment
    SingleSegment,
}

/// Matching options for a [`Router`](crate::Router)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub wildcard_mode: WildcardMode,
}

/// Layout of a config file: everything lives under `[router]`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    router: RouterConfig,
}

impl RouterConfig {
    /// Sets the wildcard mode
    pub fn with_wildcard_mode(mut self, mode: WildcardMode) -> Self {
        self.wildcard_mode = mode;
        self
    }

    /// Parses the `[router]` table out of TOML text
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::{RouterConfig, WildcardMode};
    ///
    /// let config = RouterConfig::from_toml_str(r#"
    ///     [router]
    ///     wildcard_mode = "single_segment"
    /// "#).unwrap();
    /// assert_eq!(config.wildcard_mode, WildcardMode::SingleSegment);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).context("Failed to parse router configuration")?;
        Ok(file.router)
    }

    /// Loads configuration from a TOML file
    ///
    /// A missing or blank file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

//! Configuration management.
//!
//! Config is stored at `~/.config/git-finder/config.toml` and contains:
//! - where the project registry lives
//! - how ripgrep is invoked (binary, timeout, output ceiling)
//! - default search limits

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::projects::ProjectStore;
use crate::search::engine::{DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT};
use crate::search::{DEFAULT_CONTEXT_LINES, DEFAULT_MAX_RESULTS, RipgrepEngine, SearchOptions};

const CONFIG_DIR: &str = "git-finder";
const CONFIG_FILE: &str = "config.toml";

/// Registry directory under `$HOME` when nothing else is configured.
pub const DEFAULT_DATA_DIR_NAME: &str = ".git-finder-mcp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `projects.json` (default: ~/.git-finder-mcp).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// ripgrep binary, looked up on PATH unless absolute.
    #[serde(default = "default_rg_path")]
    pub rg_path: PathBuf,

    /// Wall-clock limit for one ripgrep invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// stdout ceiling for one ripgrep invocation.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

fn default_rg_path() -> PathBuf {
    PathBuf::from("rg")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_max_output_bytes() -> usize {
    DEFAULT_MAX_OUTPUT_BYTES
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            rg_path: default_rg_path(),
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
            max_results: default_max_results(),
            context_lines: default_context_lines(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Registry directory: explicit override, then config, then `~/.git-finder-mcp`.
    pub fn resolve_data_dir(&self, overridden: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = overridden {
            return Ok(dir.to_path_buf());
        }
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(DEFAULT_DATA_DIR_NAME))
    }

    pub fn project_store(&self, overridden: Option<&Path>) -> Result<ProjectStore> {
        Ok(ProjectStore::new(self.resolve_data_dir(overridden)?))
    }

    pub fn search_engine(&self) -> RipgrepEngine {
        RipgrepEngine::new(&self.rg_path)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_output_bytes(self.max_output_bytes)
    }

    /// Search options seeded from config defaults.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            file_pattern: None,
            max_results: self.max_results,
            context_lines: self.context_lines,
        }
    }
}

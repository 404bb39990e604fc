//! Configuration for pslocate.
//!
//! Settings are read from `pslocate.toml` in the project directory and then
//! layered: file → environment → CLI.
//!
//! # Configuration File Format
//!
//! ```toml
//! [scan]
//! extensions = ["ps1", "psm1"]
//! follow_links = false
//! exclude = ["**/node_modules/**", "vendor"]
//! ```
//!
//! # Environment
//!
//! - `PSLOCATE_EXTENSIONS`: comma-separated extensions, replaces `scan.extensions`
//! - `PSLOCATE_FOLLOW_LINKS`: boolean string (`true`, `yes`, `0`, ...)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::locator::{DEFAULT_EXTENSIONS, ScanOptions};
use crate::util::{parse_bool, split_list};

/// Name of the configuration file within the project directory.
pub const CONFIG_FILE: &str = "pslocate.toml";

pub const ENV_EXTENSIONS: &str = "PSLOCATE_EXTENSIONS";
pub const ENV_FOLLOW_LINKS: &str = "PSLOCATE_FOLLOW_LINKS";

/// The `[scan]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSection {
    /// Script extensions to scan, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,
    /// Glob patterns, relative to the scan root, to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            follow_links: false,
            exclude: Vec::new(),
        }
    }
}

/// The complete pslocate.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocatorToml {
    #[serde(default)]
    pub scan: ScanSection,
}

impl LocatorToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pslocate.toml")
    }

    /// Load `pslocate.toml` from `project_dir`, or defaults if it does not exist.
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize pslocate.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.scan.extensions.is_empty() {
            warnings.push("scan.extensions is empty: no files will be scanned".to_string());
        }

        for ext in &self.scan.extensions {
            if ext.starts_with('.') {
                warnings.push(format!(
                    "Extension '{}' has a leading dot; it will be treated as '{}'",
                    ext,
                    ext.trim_start_matches('.')
                ));
            }
        }

        for pattern in &self.scan.exclude {
            if let Err(e) = glob::Pattern::new(pattern) {
                warnings.push(format!("Invalid exclude pattern '{}': {}", pattern, e));
            }
        }

        warnings
    }
}

/// Layered configuration: pslocate.toml, then environment, then CLI.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub project_dir: PathBuf,
    /// Where pslocate.toml is (or would be)
    pub config_path: PathBuf,
    /// Parsed pslocate.toml, or defaults
    pub toml: LocatorToml,
    /// CLI override for the extension list
    pub cli_extensions: Option<Vec<String>>,
}

impl LocatorConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        Self::with_cli_args(project_dir, None)
    }

    pub fn with_cli_args(project_dir: PathBuf, cli_extensions: Option<Vec<String>>) -> Result<Self> {
        let toml = LocatorToml::load_or_default(&project_dir)?;
        let config_path = project_dir.join(CONFIG_FILE);
        Ok(Self {
            project_dir,
            config_path,
            toml,
            cli_extensions,
        })
    }

    /// Effective extension list (CLI, then environment, then file).
    pub fn extensions(&self) -> Vec<String> {
        self.extensions_with_env(|key| std::env::var(key).ok())
    }

    /// Effective follow-links setting (environment, then file).
    pub fn follow_links(&self) -> bool {
        self.follow_links_with_env(|key| std::env::var(key).ok())
    }

    fn extensions_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let raw = if let Some(cli) = &self.cli_extensions {
            cli.clone()
        } else if let Some(value) = env(ENV_EXTENSIONS) {
            split_list(&value)
        } else {
            self.toml.scan.extensions.clone()
        };

        raw.iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }

    fn follow_links_with_env(&self, env: impl Fn(&str) -> Option<String>) -> bool {
        if let Some(value) = env(ENV_FOLLOW_LINKS) {
            match parse_bool(&value) {
                Some(follow) => return follow,
                None => tracing::warn!(
                    variable = ENV_FOLLOW_LINKS,
                    value = %value,
                    "ignoring unrecognised boolean"
                ),
            }
        }
        self.toml.scan.follow_links
    }

    /// Resolve everything into the options a scan runs with.
    pub fn scan_options(&self) -> Result<ScanOptions> {
        self.scan_options_with_env(|key| std::env::var(key).ok())
    }

    fn scan_options_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Result<ScanOptions> {
        let exclude = self
            .toml
            .scan
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ScanOptions {
            extensions: self.extensions_with_env(&env),
            follow_links: self.follow_links_with_env(&env),
            exclude,
        })
    }
}

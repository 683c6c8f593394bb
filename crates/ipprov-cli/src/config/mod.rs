//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use ipprov_core::{Address, IgnoreList, DEFAULT_IGNORED};
use ipprov_recon::{CommandLookup, DEFAULT_SUFFIX};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PTR suffix used by `classify`.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Addresses never reported by `hardcoded`.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<Address>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// External lookup programs.
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Programs and limits for reverse-DNS and WHOIS lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Reverse-DNS program, invoked as `<dig> +short -x <addr>`.
    #[serde(default = "default_dig")]
    pub dig: String,

    /// Registry program, invoked as `<whois> <addr>`.
    #[serde(default = "default_whois")]
    pub whois: String,

    /// Seconds before a lookup is abandoned.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            ignore: default_ignore(),
            output_format: None,
            lookup: LookupConfig::default(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            dig: default_dig(),
            whois: default_whois(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_suffix() -> String {
    String::from(DEFAULT_SUFFIX)
}

fn default_ignore() -> Vec<Address> {
    DEFAULT_IGNORED
        .iter()
        .map(|ip| Address::from(IpAddr::V4(*ip)))
        .collect()
}

fn default_dig() -> String {
    String::from("dig")
}

fn default_whois() -> String {
    String::from("whois")
}

const fn default_timeout() -> u64 {
    10
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "ipprov", "ipprov")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load from `explicit` if given, otherwise from the default path.
    ///
    /// A missing default file yields defaults; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured ignore list.
    pub fn ignore_list(&self) -> IgnoreList {
        IgnoreList::new(self.ignore.iter().cloned())
    }

    /// Lookup service using the configured programs.
    pub fn lookup_service(&self) -> CommandLookup {
        CommandLookup::new()
            .with_programs(&self.lookup.dig, &self.lookup.whois)
            .with_timeout(Duration::from_secs(self.lookup.timeout_secs))
    }
}

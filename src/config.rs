use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::{GenerationOptions, RollupDepth};
use crate::error::Result;
use crate::lookup::LookupKind;

/// Represents the complete configuration for docker-tags.
///
/// Every value can also be given on the command line or through the
/// `INPUT_*` environment variables of a GitHub Action; those win over the file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Image name the tags are attached to, e.g. `ghcr.io/acme/widget`
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub lookup: LookupConfig,
}

fn default_true() -> bool {
    true
}

/// Settings for tag generation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GenerationConfig {
    #[serde(default)]
    pub flavour: String,

    /// Rollup selection, e.g. `"minor"` or `"major"`
    #[serde(default)]
    pub updates: String,

    #[serde(default = "default_true")]
    pub tags_latest: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            flavour: String::new(),
            updates: String::new(),
            tags_latest: true,
        }
    }
}

/// Where the latest existing tag is looked up
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// GitHub REST API
    #[default]
    Github,
    /// Tags of the local clone
    Git,
    /// No lookup; every build is treated as the newest
    #[serde(rename = "none")]
    #[value(name = "none")]
    Disabled,
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupSource::Github => write!(f, "github"),
            LookupSource::Git => write!(f, "git"),
            LookupSource::Disabled => write!(f, "none"),
        }
    }
}

/// Settings for the latest-tag lookup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LookupConfig {
    #[serde(default)]
    pub source: LookupSource,

    #[serde(default)]
    pub releases_only: bool,

    /// Only consider tags starting with this prefix
    #[serde(default)]
    pub prefix: String,

    /// Sort all candidates instead of trusting the API order
    #[serde(default = "default_true")]
    pub sort: bool,

    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            source: LookupSource::default(),
            releases_only: false,
            prefix: String::new(),
            sort: true,
            api_url: None,
        }
    }
}

impl LookupConfig {
    pub fn kind(&self) -> LookupKind {
        LookupKind::from_releases_only(self.releases_only)
    }
}

/// Values given on the command line, applied on top of the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub image: Option<String>,
    pub flavour: Option<String>,
    pub updates: Option<String>,
    pub tags_latest: Option<bool>,
    pub source: Option<LookupSource>,
    pub releases_only: Option<bool>,
    pub prefix: Option<String>,
    pub sort: Option<bool>,
    pub api_url: Option<String>,
}

impl Config {
    /// Apply command line values; `None` keeps the configured value
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(image) = overrides.image.filter(|i| !i.is_empty()) {
            self.image = Some(image);
        }
        if let Some(flavour) = overrides.flavour {
            self.generation.flavour = flavour;
        }
        if let Some(updates) = overrides.updates {
            self.generation.updates = updates;
        }
        if let Some(tags_latest) = overrides.tags_latest {
            self.generation.tags_latest = tags_latest;
        }
        if let Some(source) = overrides.source {
            self.lookup.source = source;
        }
        if let Some(releases_only) = overrides.releases_only {
            self.lookup.releases_only = releases_only;
        }
        if let Some(prefix) = overrides.prefix {
            self.lookup.prefix = prefix;
        }
        if let Some(sort) = overrides.sort {
            self.lookup.sort = sort;
        }
        if let Some(api_url) = overrides.api_url.filter(|u| !u.is_empty()) {
            self.lookup.api_url = Some(api_url);
        }
        self
    }

    /// Generation options for this configuration and a known latest tag
    pub fn generation_options(&self, latest_known_tag: Option<String>) -> GenerationOptions {
        GenerationOptions {
            flavour: self.generation.flavour.trim().to_string(),
            rollup: RollupDepth::from_updates(&self.generation.updates),
            mark_latest: self.generation.tags_latest,
            latest_known_tag,
        }
    }
}

/// Parse an Action style boolean input.
///
/// Empty means "not set"; anything other than `true` (any case) is false.
pub fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.eq_ignore_ascii_case("true"))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `dockertags.toml` in current directory
/// 3. `.dockertags.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./dockertags.toml").exists() {
        fs::read_to_string("./dockertags.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".dockertags.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

//! Configuration management for wikisnap.
//!
//! Parses `wikisnap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. CLI settings can be
//! applied during load via [`CliSettings`].
//!
//! `snapshot.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ```toml
//! [snapshot]
//! path = "snapshot.json"
//! base_url = "${WIKI_MIRROR:-http://www.scp-wiki.net}"
//!
//! [overrides]
//! builtin = true
//!
//! [[overrides.rules]]
//! kind = "children-exclude"
//! url = "wills-and-ways-hub"
//! exclude = "marshall-carter-and-dark-hub"
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "wikisnap.toml";

const DEFAULT_SNAPSHOT: &str = "snapshot.json";
const DEFAULT_BASE_URL: &str = "http://www.scp-wiki.net";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override snapshot dump path.
    pub snapshot: Option<PathBuf>,
    /// Override wiki base url.
    pub base_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot configuration (path is a relative string from TOML).
    snapshot: SnapshotConfigRaw,
    /// Override table configuration.
    pub overrides: OverridesConfig,

    /// Resolved snapshot configuration (set after loading).
    #[serde(skip)]
    pub snapshot_resolved: SnapshotConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SnapshotConfigRaw {
    path: Option<String>,
    base_url: Option<String>,
}

/// Resolved snapshot configuration.
#[derive(Debug, Default)]
pub struct SnapshotConfig {
    /// Absolute path of the JSON snapshot dump.
    pub path: PathBuf,
    /// Site root the snapshot was captured from.
    pub base_url: String,
}

/// Override table configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    /// Whether the curated built-in table is used.
    pub builtin: bool,
    /// Additional rules, applied after the built-in table.
    pub rules: Vec<OverrideRuleConfig>,
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            rules: Vec::new(),
        }
    }
}

/// One configured override rule.
///
/// `url` is a path relative to the base url or an absolute url.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OverrideRuleConfig {
    /// Replace the page content; a missing `value` makes it absent.
    Content {
        url: String,
        #[serde(default)]
        value: Option<String>,
    },
    /// Children are `{url}-{n}` for `n` in `start..end`.
    ChildrenRange { url: String, start: u32, end: u32 },
    /// Resolved children minus one page.
    ChildrenExclude { url: String, exclude: String },
    /// No children.
    ChildrenEmpty { url: String },
}

impl OverrideRuleConfig {
    /// Target page of the rule.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Content { url, .. }
            | Self::ChildrenRange { url, .. }
            | Self::ChildrenExclude { url, .. }
            | Self::ChildrenEmpty { url } => url,
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let field = format!("overrides.rules[{index}]");
        require_non_empty(self.url(), &format!("{field}.url"))?;
        match self {
            Self::ChildrenRange { start, end, .. } if start >= end => Err(ConfigError::Validation(
                format!("{field}: start ({start}) must be less than end ({end})"),
            )),
            Self::ChildrenExclude { exclude, .. } => {
                require_non_empty(exclude, &format!("{field}.exclude"))
            }
            _ => Ok(()),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`snapshot.base_url`").
        field: String,
        /// Error message (e.g., "${`WIKI_MIRROR`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `wikisnap.toml` in the current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied last and take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(snapshot) = &settings.snapshot {
            self.snapshot_resolved.path.clone_from(snapshot);
        }
        if let Some(base_url) = &settings.base_url {
            self.snapshot_resolved.base_url.clone_from(base_url);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.snapshot_resolved.base_url, "snapshot.base_url")?;
        require_http_url(&self.snapshot_resolved.base_url, "snapshot.base_url")?;
        for (index, rule) in self.overrides.rules.iter().enumerate() {
            rule.validate(index)?;
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            snapshot: SnapshotConfigRaw::default(),
            overrides: OverridesConfig::default(),
            snapshot_resolved: SnapshotConfig {
                path: base.join(DEFAULT_SNAPSHOT),
                base_url: DEFAULT_BASE_URL.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Expand variables and resolve the snapshot path against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let base_url = match &self.snapshot.base_url {
            Some(url) => expand::expand_env(url, "snapshot.base_url")?,
            None => DEFAULT_BASE_URL.to_owned(),
        };
        self.snapshot_resolved = SnapshotConfig {
            path: config_dir.join(self.snapshot.path.as_deref().unwrap_or(DEFAULT_SNAPSHOT)),
            base_url,
        };
        Ok(())
    }
}

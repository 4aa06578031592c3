use crate::error::{Result, TfilterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILTER: &str = "all";

/// Configuration for tfilter, stored in <config dir>/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TfilterConfig {
    /// Treat `a/b` as a subcategory of `a` when filtering by category
    #[serde(default)]
    pub nested_categories: bool,

    /// State filter name used when `--filter` is not given
    #[serde(default = "default_filter")]
    pub default_filter: String,

    /// Snapshot file read when `--input` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for TfilterConfig {
    fn default() -> Self {
        Self {
            nested_categories: false,
            default_filter: default_filter(),
            snapshot: None,
        }
    }
}

impl TfilterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TfilterError::Io)?;
        let config: TfilterConfig =
            serde_json::from_str(&content).map_err(TfilterError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TfilterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TfilterError::Serialization)?;
        fs::write(config_path, content).map_err(TfilterError::Io)?;
        Ok(())
    }

    /// Render a single key for display, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "nested-categories" => Some(self.nested_categories.to_string()),
            "default-filter" => Some(self.default_filter.clone()),
            "snapshot" => Some(
                self.snapshot
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set a key from its textual value.
    ///
    /// An empty `snapshot` value clears the default snapshot path.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "nested-categories" => {
                self.nested_categories = value.parse().map_err(|_| {
                    TfilterError::Api(format!(
                        "nested-categories expects true or false, got '{}'",
                        value
                    ))
                })?;
            }
            "default-filter" => self.default_filter = value.to_string(),
            "snapshot" if value.is_empty() => self.snapshot = None,
            "snapshot" => self.snapshot = Some(PathBuf::from(value)),
            other => {
                return Err(TfilterError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["nested-categories", "default-filter", "snapshot"]
    }
}

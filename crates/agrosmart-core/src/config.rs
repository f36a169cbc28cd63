use crate::dataset::http::{DEFAULT_DATASET_URL, DEFAULT_TIMEOUT};
use crate::error::AgroError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings read from an optional TOML file.
///
/// ```toml
/// profiles = "my-profiles.json"
///
/// [dataset]
/// url = "https://example.org/crops.csv"
/// timeout_secs = 15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    /// Custom crop profile JSON; the built-in set is used when unset.
    pub profiles: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub url: String,
    /// Local CSV file; takes precedence over `url`.
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            url: DEFAULT_DATASET_URL.to_string(),
            path: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl DatasetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load a config file. Relative paths inside it resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<AppConfig, AgroError> {
        let content = std::fs::read_to_string(path).map_err(|e| AgroError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut config = Self::parse(&content).map_err(|e| match e {
            AgroError::ConfigInvalid(reason) => AgroError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        if let Some(dir) = path.parent() {
            config.resolve_relative_to(dir);
        }
        Ok(config)
    }

    pub fn parse(toml_str: &str) -> Result<AppConfig, AgroError> {
        let config: AppConfig =
            toml::from_str(toml_str).map_err(|e| AgroError::ConfigInvalid(e.to_string()))?;
        if config.dataset.timeout_secs == 0 {
            return Err(AgroError::ConfigInvalid(
                "dataset.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, dir: &Path) {
        if let Some(p) = self.dataset.path.as_mut() {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        }
        if let Some(p) = self.profiles.as_mut() {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        }
    }
}

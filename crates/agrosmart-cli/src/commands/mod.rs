pub mod crops;
pub mod estimate;
pub mod profiles;

use agrosmart_core::config::AppConfig;
use agrosmart_core::error::AgroError;
use clap::Args;
use std::path::PathBuf;

/// Dataset and profile options shared by every command.
#[derive(Args, Default)]
pub struct DatasetArgs {
    /// TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of the crop reference CSV
    #[arg(long, global = true, value_name = "URL")]
    dataset_url: Option<String>,

    /// Local crop reference CSV (overrides --dataset-url)
    #[arg(long, global = true, value_name = "FILE")]
    dataset_file: Option<PathBuf>,

    /// Timeout for downloading the dataset, in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Custom crop profile JSON (default: built-in profiles)
    #[arg(long, global = true, value_name = "FILE")]
    profiles: Option<PathBuf>,
}

impl DatasetArgs {
    /// Config file values with command-line flags layered on top.
    pub fn resolve(&self) -> Result<AppConfig, AgroError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(url) = &self.dataset_url {
            config.dataset.url = url.clone();
            config.dataset.path = None;
        }
        if let Some(path) = &self.dataset_file {
            config.dataset.path = Some(path.clone());
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                return Err(AgroError::InvalidInput(
                    "--timeout-secs must be at least 1".into(),
                ));
            }
            config.dataset.timeout_secs = secs;
        }
        if let Some(path) = &self.profiles {
            config.profiles = Some(path.clone());
        }

        Ok(config)
    }
}

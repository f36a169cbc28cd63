pub mod config;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod model;
pub mod profiles;
pub mod trace;

use config::{AppConfig, DatasetConfig};
use dataset::file::FileSource;
use dataset::http::HttpSource;
use dataset::{CachedDataset, DatasetSource, ReferenceData};
use error::AgroError;
use estimate::{Estimator, IrrigationResult};
use profiles::schema::CropProfileSet;
use trace::EstimateTrace;

/// Dataset whose backend is chosen at runtime.
pub type ConfiguredDataset = CachedDataset<Box<dyn DatasetSource>>;

/// Main API entry point: estimate irrigation for one crop.
pub fn estimate_irrigation(
    crop_name: &str,
    reference: &dyn ReferenceData,
    profiles: &CropProfileSet,
) -> Result<IrrigationResult, AgroError> {
    Estimator::new(reference, profiles).estimate(crop_name)
}

/// Estimate irrigation and also return the step-by-step trace.
pub fn estimate_with_trace(
    crop_name: &str,
    reference: &dyn ReferenceData,
    profiles: &CropProfileSet,
) -> Result<(IrrigationResult, EstimateTrace), AgroError> {
    let assessment = Estimator::new(reference, profiles).assess(crop_name)?;
    let trace = trace::build_trace(&assessment);
    Ok((assessment.to_result(), trace))
}

/// Build the (not yet loaded) dataset described by `config`.
///
/// A local file takes precedence over the URL.
pub fn open_dataset(config: &DatasetConfig) -> ConfiguredDataset {
    let source: Box<dyn DatasetSource> = match &config.path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(config.url.clone()).with_timeout(config.timeout())),
    };
    CachedDataset::new(source)
}

/// Load the configured crop profiles, or the built-in set.
pub fn load_configured_profiles(config: &AppConfig) -> Result<CropProfileSet, AgroError> {
    match &config.profiles {
        Some(path) => profiles::load_profiles(path),
        None => Ok(profiles::builtin::builtin_profiles().clone()),
    }
}

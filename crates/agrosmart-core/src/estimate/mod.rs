pub mod engine;
pub mod outcome;
pub mod scoring;

pub use engine::{assess, normalize_crop_key, Assessment};
pub use outcome::{Explanation, FailureReport, IrrigationResult};

use crate::dataset::ReferenceData;
use crate::error::AgroError;
use crate::profiles::builtin::builtin_profiles;
use crate::profiles::schema::CropProfileSet;

/// Irrigation estimator bound to a reference dataset and a crop profile set.
///
/// Holds no state of its own; repeated calls only read the dataset.
pub struct Estimator<'a> {
    reference: &'a dyn ReferenceData,
    profiles: &'a CropProfileSet,
}

impl<'a> Estimator<'a> {
    pub fn new(reference: &'a dyn ReferenceData, profiles: &'a CropProfileSet) -> Self {
        Estimator {
            reference,
            profiles,
        }
    }

    /// Estimator using the built-in crop profiles.
    pub fn with_builtin_profiles(reference: &'a dyn ReferenceData) -> Self {
        Self::new(reference, builtin_profiles())
    }

    /// Recommend irrigation for `crop_name` (case-insensitive).
    ///
    /// Fails only with [`AgroError::InvalidInput`] for an empty name and
    /// [`AgroError::CropNotFound`] when the dataset has no reading for the
    /// crop. Missing profile entries and unrecognized soil or fertilizer
    /// labels fall back to defaults.
    pub fn estimate(&self, crop_name: &str) -> Result<IrrigationResult, AgroError> {
        Ok(self.assess(crop_name)?.to_result())
    }

    /// Like [`Estimator::estimate`] but keeps the unrounded intermediates.
    pub fn assess(&self, crop_name: &str) -> Result<Assessment, AgroError> {
        engine::assess(crop_name, self.reference, self.profiles)
    }

    /// Crop keys the dataset can answer for.
    pub fn available_crops(&self) -> Vec<String> {
        self.reference.crop_keys()
    }
}

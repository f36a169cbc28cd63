use crate::model::NutrientLevels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_BASELINE_MM_PER_DAY: f64 = 5.0;

/// Largest accepted baseline. Keeps every result within the range the
/// rounded mm/day and liter figures can represent.
pub const MAX_BASELINE_MM_PER_DAY: f64 = 1000.0;

fn default_baseline() -> f64 {
    DEFAULT_BASELINE_MM_PER_DAY
}

/// A set of per-crop water and nutrient reference values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfileSet {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Baseline used for crops without their own entry.
    #[serde(default = "default_baseline")]
    pub default_baseline_mm_per_day: f64,
    /// Crop key (lowercase) -> profile.
    pub crops: BTreeMap<String, CropProfile>,
}

/// Reference values for a single crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    /// Daily water need under reference conditions, in mm/day.
    #[serde(default)]
    pub baseline_mm_per_day: Option<f64>,
    #[serde(default)]
    pub optimal_nutrients: Option<NutrientLevels>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CropProfileSet {
    pub fn baseline(&self, crop_key: &str) -> Option<f64> {
        self.crops.get(crop_key).and_then(|p| p.baseline_mm_per_day)
    }

    pub fn optimal_nutrients(&self, crop_key: &str) -> Option<NutrientLevels> {
        self.crops.get(crop_key).and_then(|p| p.optimal_nutrients)
    }
}

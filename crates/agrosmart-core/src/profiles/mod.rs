pub mod builtin;
pub mod schema;

use crate::error::AgroError;
use schema::{CropProfileSet, MAX_BASELINE_MM_PER_DAY};
use std::path::Path;

/// Load a crop profile set from a JSON file.
pub fn load_profiles(path: &Path) -> Result<CropProfileSet, AgroError> {
    let content = std::fs::read_to_string(path).map_err(|e| AgroError::ProfilesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profiles(&content, path)
}

/// Parse a crop profile set from a JSON string.
pub fn parse_profiles(json: &str, source: &Path) -> Result<CropProfileSet, AgroError> {
    let set: CropProfileSet = serde_json::from_str(json).map_err(|e| AgroError::ProfilesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profiles(&set)?;
    Ok(set)
}

/// Parse a crop profile set from a JSON string (no file path context).
pub fn parse_profiles_str(json: &str) -> Result<CropProfileSet, AgroError> {
    let set: CropProfileSet = serde_json::from_str(json)?;
    validate_profiles(&set)?;
    Ok(set)
}

/// Validate that a profile set is well-formed.
///
/// Every value that ends up as a divisor or multiplier must be strictly
/// positive.
pub fn validate_profiles(set: &CropProfileSet) -> Result<(), AgroError> {
    if !is_positive(set.default_baseline_mm_per_day) {
        return Err(AgroError::ProfilesInvalid(format!(
            "default_baseline_mm_per_day must be positive, got {}",
            set.default_baseline_mm_per_day
        )));
    }
    if set.default_baseline_mm_per_day > MAX_BASELINE_MM_PER_DAY {
        return Err(AgroError::ProfilesInvalid(format!(
            "default_baseline_mm_per_day {} exceeds {} mm/day",
            set.default_baseline_mm_per_day, MAX_BASELINE_MM_PER_DAY
        )));
    }

    if set.crops.is_empty() {
        return Err(AgroError::ProfilesInvalid("crops must not be empty".into()));
    }

    for (key, profile) in &set.crops {
        if key.trim().is_empty() {
            return Err(AgroError::ProfilesInvalid(
                "crop key must not be empty".into(),
            ));
        }

        if *key != key.trim().to_lowercase() {
            return Err(AgroError::ProfilesInvalid(format!(
                "crop key '{}' must be lowercase without surrounding whitespace",
                key
            )));
        }

        if profile.baseline_mm_per_day.is_none() && profile.optimal_nutrients.is_none() {
            return Err(AgroError::ProfilesInvalid(format!(
                "crop '{}' has neither a baseline nor optimal nutrients",
                key
            )));
        }

        if let Some(baseline) = profile.baseline_mm_per_day {
            if !is_positive(baseline) {
                return Err(AgroError::ProfilesInvalid(format!(
                    "crop '{}' has non-positive baseline {}",
                    key, baseline
                )));
            }
            if baseline > MAX_BASELINE_MM_PER_DAY {
                return Err(AgroError::ProfilesInvalid(format!(
                    "crop '{}' baseline {} exceeds {} mm/day",
                    key, baseline, MAX_BASELINE_MM_PER_DAY
                )));
            }
        }

        if let Some(opt) = profile.optimal_nutrients {
            for (nutrient, value) in [
                ("nitrogen", opt.nitrogen),
                ("phosphorous", opt.phosphorous),
                ("potassium", opt.potassium),
            ] {
                if !is_positive(value) {
                    return Err(AgroError::ProfilesInvalid(format!(
                        "crop '{}' has non-positive optimal {} {}",
                        key, nutrient, value
                    )));
                }
            }
        }
    }

    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

use crate::dataset::ReferenceData;
use crate::error::AgroError;
use crate::estimate::outcome::{liters_per_ha_per_day, round_display, Explanation, IrrigationResult};
use crate::estimate::scoring::{self, StressScores};
use crate::model::{
    EnvironmentalReading, FertilizerClass, IrrigationLevel, NutrientLevels, SoilType,
};
use crate::profiles::schema::CropProfileSet;

/// Full-precision intermediate values of one estimate.
///
/// Everything a result or a trace reports is derived from this; nothing
/// here is rounded.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// Crop name as given.
    pub crop: String,
    /// Normalized lookup key.
    pub crop_key: String,
    pub reading: EnvironmentalReading,
    pub baseline_mm_per_day: f64,
    /// True if the crop had no baseline and the profile default was used.
    pub baseline_defaulted: bool,
    pub optimal_nutrients: Option<NutrientLevels>,
    pub scores: StressScores,
    pub irrigation_index: f64,
    pub soil_type: Option<SoilType>,
    pub soil_multiplier: f64,
    pub fertilizer: Option<FertilizerClass>,
    pub fertilizer_multiplier: f64,
    pub mm_per_day: f64,
    pub level: IrrigationLevel,
}

/// Normalize a crop name into a lookup key.
pub fn normalize_crop_key(crop_name: &str) -> Result<String, AgroError> {
    let key = crop_name.trim().to_lowercase();
    if key.is_empty() {
        return Err(AgroError::InvalidInput("crop name is empty".into()));
    }
    Ok(key)
}

/// Run the estimate for one crop and keep every intermediate value.
pub fn assess(
    crop_name: &str,
    reference: &dyn ReferenceData,
    profiles: &CropProfileSet,
) -> Result<Assessment, AgroError> {
    let crop_key = normalize_crop_key(crop_name)?;

    let reading = match reference.lookup(&crop_key) {
        Some(r) => r.clone(),
        None => {
            return Err(AgroError::CropNotFound {
                crop: crop_name.to_string(),
                available: reference.crop_keys(),
            })
        }
    };

    let (baseline_mm_per_day, baseline_defaulted) = match profiles.baseline(&crop_key) {
        Some(b) => (b, false),
        None => {
            log::debug!(
                "No baseline for '{crop_key}', using default {} mm/day",
                profiles.default_baseline_mm_per_day
            );
            (profiles.default_baseline_mm_per_day, true)
        }
    };

    let optimal_nutrients = profiles.optimal_nutrients(&crop_key);
    if optimal_nutrients.is_none() {
        log::debug!("No optimal nutrients for '{crop_key}', using default nutrient score");
    }

    let scores = StressScores {
        temperature: scoring::temperature_score(reading.temperature),
        humidity: scoring::humidity_score(reading.humidity),
        moisture: scoring::moisture_score(reading.moisture),
        nutrient: scoring::nutrient_score(&reading.nutrients(), optimal_nutrients.as_ref()),
    };
    let irrigation_index = scores.irrigation_index();

    let soil_type = SoilType::from_str_loose(&reading.soil_type);
    let soil_multiplier = soil_type.map_or(SoilType::NEUTRAL_MULTIPLIER, SoilType::multiplier);

    let fertilizer = FertilizerClass::from_str_loose(&reading.fertilizer_name);
    let fertilizer_multiplier =
        fertilizer.map_or(FertilizerClass::NEUTRAL_MULTIPLIER, FertilizerClass::multiplier);

    let mm_per_day =
        baseline_mm_per_day * (1.0 + irrigation_index) * soil_multiplier * fertilizer_multiplier;
    let level = IrrigationLevel::from_mm_per_day(mm_per_day);

    Ok(Assessment {
        crop: crop_name.to_string(),
        crop_key,
        reading,
        baseline_mm_per_day,
        baseline_defaulted,
        optimal_nutrients,
        scores,
        irrigation_index,
        soil_type,
        soil_multiplier,
        fertilizer,
        fertilizer_multiplier,
        mm_per_day,
        level,
    })
}

impl Assessment {
    /// Rounded, serializable result. The level is taken from the
    /// unrounded mm/day value.
    pub fn to_result(&self) -> IrrigationResult {
        let mm_per_day = round_display(self.mm_per_day);
        IrrigationResult {
            crop: self.crop.clone(),
            irrigation_mm_per_day: mm_per_day,
            irrigation_liters_per_ha_per_day: liters_per_ha_per_day(mm_per_day),
            irrigation_level: self.level,
            explanation: Explanation {
                temperature_score: round_display(self.scores.temperature),
                humidity_score: round_display(self.scores.humidity),
                moisture_score: round_display(self.scores.moisture),
                nutrient_score: round_display(self.scores.nutrient),
                irrigation_index: round_display(self.irrigation_index),
                soil_multiplier: round_display(self.soil_multiplier),
                fertilizer_multiplier: round_display(self.fertilizer_multiplier),
            },
            crop_data: self.reading.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StaticDataset;
    use crate::profiles::builtin::builtin_profiles;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn rice_reading() -> EnvironmentalReading {
        EnvironmentalReading {
            temperature: 30.0,
            humidity: 40.0,
            moisture: 20.0,
            soil_type: "clay".into(),
            nitrogen: 80.0,
            potassium: 20.0,
            phosphorous: 30.0,
            fertilizer_name: "Urea".into(),
        }
    }

    #[test]
    fn test_rice_scenario() {
        let ds = StaticDataset::from_readings([("rice", rice_reading())]);
        let a = assess("rice", &ds, builtin_profiles()).unwrap();

        assert_eq!(a.baseline_mm_per_day, 8.0);
        assert!(!a.baseline_defaulted);
        assert!((a.irrigation_index - 0.656_666_666).abs() < 1e-6);
        assert!((a.mm_per_day - 11.8286).abs() < 1e-6);
        assert_eq!(a.soil_type, Some(SoilType::Clay));
        assert_eq!(a.fertilizer, Some(FertilizerClass::Urea));
        assert_eq!(a.level, IrrigationLevel::High);

        let r = a.to_result();
        assert_eq!(r.irrigation_mm_per_day, dec!(11.83));
        assert_eq!(r.irrigation_liters_per_ha_per_day, 118_300);
        assert_eq!(r.explanation.temperature_score, dec!(0.67));
        assert_eq!(r.explanation.humidity_score, dec!(0.6));
        assert_eq!(r.explanation.moisture_score, dec!(0.8));
        assert_eq!(r.explanation.nutrient_score, dec!(0.44));
        assert_eq!(r.explanation.irrigation_index, dec!(0.66));
        assert_eq!(r.explanation.soil_multiplier, dec!(0.85));
        assert_eq!(r.explanation.fertilizer_multiplier, dec!(1.05));
    }

    #[test]
    fn test_empty_name_is_invalid_input() {
        let ds = StaticDataset::default();
        for name in ["", "   "] {
            assert!(matches!(
                assess(name, &ds, builtin_profiles()),
                Err(AgroError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_missing_reading_is_not_found() {
        let ds = StaticDataset::from_readings([("rice", rice_reading())]);
        match assess("Dragonfruit", &ds, builtin_profiles()) {
            Err(AgroError::CropNotFound { crop, available }) => {
                assert_eq!(crop, "Dragonfruit");
                assert_eq!(available, vec!["rice"]);
            }
            other => panic!("expected CropNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_crop_without_profile_uses_defaults() {
        let ds = StaticDataset::from_readings([("okra", EnvironmentalReading::default())]);
        let a = assess("okra", &ds, builtin_profiles()).unwrap();
        assert!(a.baseline_defaulted);
        assert_eq!(a.baseline_mm_per_day, 5.0);
        assert_eq!(a.optimal_nutrients, None);
        assert_eq!(a.scores.nutrient, scoring::DEFAULT_NUTRIENT_SCORE);
    }

    #[test]
    fn test_unknown_soil_and_fertilizer_are_neutral() {
        let reading = EnvironmentalReading {
            soil_type: "black".into(),
            fertilizer_name: "DAP".into(),
            ..rice_reading()
        };
        let ds = StaticDataset::from_readings([("rice", reading)]);
        let a = assess("rice", &ds, builtin_profiles()).unwrap();
        assert_eq!(a.soil_type, None);
        assert_eq!(a.soil_multiplier, 1.0);
        assert_eq!(a.fertilizer, None);
        assert_eq!(a.fertilizer_multiplier, 1.0);
    }

    #[test]
    fn test_level_uses_unrounded_value() {
        let profiles = crate::profiles::parse_profiles_str(
            r#"{
                "name": "t",
                "version": "1",
                "crops": {
                    "x": {
                        "baseline_mm_per_day": 2.999,
                        "optimal_nutrients": { "nitrogen": 1, "phosphorous": 1, "potassium": 1 }
                    }
                }
            }"#,
        )
        .unwrap();
        let reading = EnvironmentalReading {
            temperature: 10.0,
            humidity: 100.0,
            moisture: 100.0,
            fertilizer_name: "none".into(),
            ..EnvironmentalReading::default()
        };
        let ds = StaticDataset::from_readings([("x", reading)]);
        let a = assess("x", &ds, &profiles).unwrap();
        assert_eq!(a.irrigation_index, 0.0);
        assert_eq!(a.mm_per_day, 2.999);
        assert_eq!(a.level, IrrigationLevel::Low);
        // Displays as 3.00 but stays Low
        assert_eq!(a.to_result().irrigation_mm_per_day, dec!(3.00));
    }

    #[test]
    fn test_largest_baseline_keeps_figures_consistent() {
        let profiles = crate::profiles::parse_profiles_str(
            r#"{
                "name": "t",
                "version": "1",
                "crops": { "x": { "baseline_mm_per_day": 1000 } }
            }"#,
        )
        .unwrap();
        let reading = EnvironmentalReading {
            temperature: 45.0,
            humidity: 0.0,
            moisture: 0.0,
            soil_type: "sandy".into(),
            fertilizer_name: "Urea".into(),
            ..EnvironmentalReading::default()
        };
        let ds = StaticDataset::from_readings([("x", reading)]);
        let r = assess("x", &ds, &profiles).unwrap().to_result();

        assert_eq!(r.irrigation_level, IrrigationLevel::High);
        assert!(r.irrigation_mm_per_day > dec!(2000));
        assert_eq!(
            Decimal::from(r.irrigation_liters_per_ha_per_day),
            r.irrigation_mm_per_day * dec!(10000)
        );
    }
}

//! Normalized stress scores feeding the irrigation index.
//!
//! Every score is dimensionless. Climate scores saturate at 0 and 1; the
//! nutrient score is the mean of per-nutrient deficiencies, each floored at
//! 0 and capped at 1.

use crate::model::NutrientLevels;

/// Temperatures at or below this contribute no irrigation stress.
pub const TEMPERATURE_FLOOR_C: f64 = 10.0;
/// Temperatures at or above this contribute full irrigation stress.
pub const TEMPERATURE_CEILING_C: f64 = 40.0;

/// Used when a crop has no optimal nutrient profile.
pub const DEFAULT_NUTRIENT_SCORE: f64 = 0.5;

pub const WEIGHT_TEMPERATURE: f64 = 0.30;
pub const WEIGHT_HUMIDITY: f64 = 0.25;
pub const WEIGHT_MOISTURE: f64 = 0.30;
pub const WEIGHT_NUTRIENT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressScores {
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub nutrient: f64,
}

impl StressScores {
    /// Weighted irrigation index. The weights sum to 1, so the index is
    /// within [0, 1] as long as every score is.
    pub fn irrigation_index(&self) -> f64 {
        WEIGHT_TEMPERATURE * self.temperature
            + WEIGHT_HUMIDITY * self.humidity
            + WEIGHT_MOISTURE * self.moisture
            + WEIGHT_NUTRIENT * self.nutrient
    }
}

/// Clamp to [0, 1]; NaN counts as no stress.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn temperature_score(temperature_c: f64) -> f64 {
    clamp_unit(
        (temperature_c - TEMPERATURE_FLOOR_C) / (TEMPERATURE_CEILING_C - TEMPERATURE_FLOOR_C),
    )
}

/// Drier air means more irrigation.
pub fn humidity_score(humidity_pct: f64) -> f64 {
    clamp_unit(1.0 - humidity_pct / 100.0)
}

/// Drier soil means more irrigation.
pub fn moisture_score(moisture_pct: f64) -> f64 {
    clamp_unit(1.0 - moisture_pct / 100.0)
}

/// Fractional shortfall of `actual` below `optimal`. A surplus is not a
/// bonus: the result never drops below 0.
pub fn deficiency(optimal: f64, actual: f64) -> f64 {
    clamp_unit((optimal - actual) / optimal)
}

/// Mean N-P-K deficiency, or [`DEFAULT_NUTRIENT_SCORE`] without an optimum.
pub fn nutrient_score(actual: &NutrientLevels, optimal: Option<&NutrientLevels>) -> f64 {
    match optimal {
        None => DEFAULT_NUTRIENT_SCORE,
        Some(opt) => {
            (deficiency(opt.nitrogen, actual.nitrogen)
                + deficiency(opt.phosphorous, actual.phosphorous)
                + deficiency(opt.potassium, actual.potassium))
                / 3.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn npk(n: f64, p: f64, k: f64) -> NutrientLevels {
        NutrientLevels {
            nitrogen: n,
            phosphorous: p,
            potassium: k,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!(approx(
            WEIGHT_TEMPERATURE + WEIGHT_HUMIDITY + WEIGHT_MOISTURE + WEIGHT_NUTRIENT,
            1.0
        ));
    }

    #[test]
    fn test_temperature_score() {
        assert_eq!(temperature_score(10.0), 0.0);
        assert_eq!(temperature_score(40.0), 1.0);
        assert!(approx(temperature_score(30.0), 2.0 / 3.0));
        assert!(approx(temperature_score(25.0), 0.5));
    }

    #[test]
    fn test_climate_scores_saturate() {
        for extreme in [-1e9, -273.15, -50.0, 0.0, 150.0, 1e9] {
            for score in [
                temperature_score(extreme),
                humidity_score(extreme),
                moisture_score(extreme),
            ] {
                assert!((0.0..=1.0).contains(&score), "{extreme} -> {score}");
            }
        }
        assert_eq!(temperature_score(-5.0), 0.0);
        assert_eq!(temperature_score(55.0), 1.0);
        assert_eq!(humidity_score(120.0), 0.0);
        assert_eq!(humidity_score(-20.0), 1.0);
        assert_eq!(moisture_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_humidity_and_moisture() {
        assert!(approx(humidity_score(40.0), 0.6));
        assert!(approx(moisture_score(20.0), 0.8));
        assert_eq!(humidity_score(100.0), 0.0);
        assert_eq!(moisture_score(0.0), 1.0);
    }

    #[test]
    fn test_surplus_is_not_a_bonus() {
        assert_eq!(deficiency(100.0, 150.0), 0.0);
        assert_eq!(deficiency(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_deficiency_capped_at_one() {
        assert_eq!(deficiency(100.0, 0.0), 1.0);
        assert_eq!(deficiency(100.0, -50.0), 1.0);
    }

    #[test]
    fn test_nutrient_score_mean() {
        let score = nutrient_score(&npk(80.0, 30.0, 20.0), Some(&npk(120.0, 60.0, 40.0)));
        assert!(approx(score, (1.0 / 3.0 + 0.5 + 0.5) / 3.0));
    }

    #[test]
    fn test_nutrient_score_without_optimum() {
        assert_eq!(nutrient_score(&npk(0.0, 0.0, 0.0), None), DEFAULT_NUTRIENT_SCORE);
    }

    #[test]
    fn test_nutrient_score_all_sufficient() {
        let opt = npk(120.0, 60.0, 40.0);
        assert_eq!(nutrient_score(&npk(200.0, 60.0, 41.0), Some(&opt)), 0.0);
    }

    #[test]
    fn test_index_bounds() {
        let zero = StressScores {
            temperature: 0.0,
            humidity: 0.0,
            moisture: 0.0,
            nutrient: 0.0,
        };
        let full = StressScores {
            temperature: 1.0,
            humidity: 1.0,
            moisture: 1.0,
            nutrient: 1.0,
        };
        assert_eq!(zero.irrigation_index(), 0.0);
        assert!(approx(full.irrigation_index(), 1.0));
    }
}

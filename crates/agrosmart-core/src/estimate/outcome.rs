use crate::error::AgroError;
use crate::model::{EnvironmentalReading, IrrigationLevel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Liters per hectare delivered by 1 mm of water.
pub const LITERS_PER_HA_PER_MM: i64 = 10_000;

/// Per-factor breakdown of an estimate, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    #[serde(rename = "S_temp", with = "rust_decimal::serde::float")]
    pub temperature_score: Decimal,
    #[serde(rename = "S_hum", with = "rust_decimal::serde::float")]
    pub humidity_score: Decimal,
    #[serde(rename = "S_moist", with = "rust_decimal::serde::float")]
    pub moisture_score: Decimal,
    #[serde(rename = "S_nutrient", with = "rust_decimal::serde::float")]
    pub nutrient_score: Decimal,
    #[serde(rename = "I_index", with = "rust_decimal::serde::float")]
    pub irrigation_index: Decimal,
    #[serde(rename = "M_soil", with = "rust_decimal::serde::float")]
    pub soil_multiplier: Decimal,
    #[serde(rename = "M_fert", with = "rust_decimal::serde::float")]
    pub fertilizer_multiplier: Decimal,
}

/// Irrigation recommendation for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationResult {
    /// Crop name as the caller gave it.
    pub crop: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub irrigation_mm_per_day: Decimal,
    /// Derived from the rounded mm/day figure.
    pub irrigation_liters_per_ha_per_day: i64,
    pub irrigation_level: IrrigationLevel,
    pub explanation: Explanation,
    /// The dataset reading the estimate was computed from.
    #[serde(rename = "cropData")]
    pub crop_data: EnvironmentalReading,
}

/// Serializable form of a caller-visible estimate failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(
        rename = "availableCrops",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_crops: Option<Vec<String>>,
}

impl FailureReport {
    pub fn from_error(err: &AgroError) -> FailureReport {
        match err {
            AgroError::InvalidInput(_) => FailureReport {
                error: "Crop name is required".into(),
                crop: None,
                available_crops: None,
            },
            AgroError::CropNotFound { crop, available } => FailureReport {
                error: "Crop not found in dataset".into(),
                crop: Some(crop.clone()),
                available_crops: Some(available.clone()),
            },
            other => FailureReport {
                error: other.to_string(),
                crop: None,
                available_crops: None,
            },
        }
    }
}

/// Round for presentation: 2 decimals, halves away from zero.
pub fn round_display(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_default()
}

/// Liters per hectare per day for an already rounded mm/day figure.
pub fn liters_per_ha_per_day(mm_per_day: Decimal) -> i64 {
    (mm_per_day * Decimal::from(LITERS_PER_HA_PER_MM))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(11.828600000000002), dec!(11.83));
        assert_eq!(round_display(0.6666666666666666), dec!(0.67));
        assert_eq!(round_display(0.125), dec!(0.13));
        assert_eq!(round_display(0.85), dec!(0.85));
        assert_eq!(round_display(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_liters_from_rounded_mm() {
        assert_eq!(liters_per_ha_per_day(dec!(11.83)), 118_300);
        assert_eq!(liters_per_ha_per_day(dec!(0)), 0);
        assert_eq!(liters_per_ha_per_day(dec!(5.1)), 51_000);
    }

    #[test]
    fn test_failure_report_not_found() {
        let err = AgroError::CropNotFound {
            crop: "dragonfruit".into(),
            available: vec!["rice".into()],
        };
        let json = serde_json::to_value(FailureReport::from_error(&err)).unwrap();
        assert_eq!(json["error"], "Crop not found in dataset");
        assert_eq!(json["crop"], "dragonfruit");
        assert_eq!(json["availableCrops"][0], "rice");
    }

    #[test]
    fn test_failure_report_invalid_input() {
        let err = AgroError::InvalidInput("crop name is empty".into());
        let json = serde_json::to_value(FailureReport::from_error(&err)).unwrap();
        assert_eq!(json["error"], "Crop name is required");
        assert!(json.get("availableCrops").is_none());
    }
}

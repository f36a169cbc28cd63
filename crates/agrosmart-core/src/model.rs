use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_HUMIDITY: f64 = 50.0;
pub const DEFAULT_MOISTURE: f64 = 50.0;
pub const DEFAULT_SOIL_TYPE: &str = "loamy";
pub const DEFAULT_NITROGEN: f64 = 50.0;
pub const DEFAULT_POTASSIUM: f64 = 30.0;
pub const DEFAULT_PHOSPHOROUS: f64 = 25.0;
pub const DEFAULT_FERTILIZER_NAME: &str = "28-28";

/// N-P-K ratio label such as "28-28" or "10-26-26".
static NPK_RATIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+-\d+").expect("NPK ratio pattern is valid"));

/// A crop's climate, soil and nutrient record from the reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReading {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Soil moisture in %.
    pub moisture: f64,
    /// Lowercased soil type label, e.g. "sandy".
    pub soil_type: String,
    pub nitrogen: f64,
    pub potassium: f64,
    pub phosphorous: f64,
    pub fertilizer_name: String,
}

impl Default for EnvironmentalReading {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
            moisture: DEFAULT_MOISTURE,
            soil_type: DEFAULT_SOIL_TYPE.to_string(),
            nitrogen: DEFAULT_NITROGEN,
            potassium: DEFAULT_POTASSIUM,
            phosphorous: DEFAULT_PHOSPHOROUS,
            fertilizer_name: DEFAULT_FERTILIZER_NAME.to_string(),
        }
    }
}

impl EnvironmentalReading {
    pub fn nutrients(&self) -> NutrientLevels {
        NutrientLevels {
            nitrogen: self.nitrogen,
            phosphorous: self.phosphorous,
            potassium: self.potassium,
        }
    }
}

/// Nitrogen, phosphorous and potassium quantities (kg/ha-equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientLevels {
    pub nitrogen: f64,
    pub phosphorous: f64,
    pub potassium: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Sandy,
    Loamy,
    Silty,
    Clay,
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilType::Sandy => write!(f, "sandy"),
            SoilType::Loamy => write!(f, "loamy"),
            SoilType::Silty => write!(f, "silty"),
            SoilType::Clay => write!(f, "clay"),
        }
    }
}

impl SoilType {
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

    /// Recognize a soil label. Matching is on the whole tag, so "clayey"
    /// is not clay.
    pub fn from_str_loose(s: &str) -> Option<SoilType> {
        match s.trim().to_lowercase().as_str() {
            "sandy" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "silty" => Some(SoilType::Silty),
            "clay" => Some(SoilType::Clay),
            _ => None,
        }
    }

    /// Water requirement scaling for this soil's drainage behaviour.
    pub fn multiplier(self) -> f64 {
        match self {
            SoilType::Sandy => 1.2,
            SoilType::Loamy => 1.0,
            SoilType::Silty => 0.95,
            SoilType::Clay => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerClass {
    Urea,
    Potash,
    Phosphate,
    NpkRatio,
}

impl fmt::Display for FertilizerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FertilizerClass::Urea => write!(f, "urea"),
            FertilizerClass::Potash => write!(f, "potash"),
            FertilizerClass::Phosphate => write!(f, "phosphate"),
            FertilizerClass::NpkRatio => write!(f, "N-P-K ratio"),
        }
    }
}

impl FertilizerClass {
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

    /// Classify a fertilizer label. Checked in priority order: urea, potash,
    /// phosphate, then a numeric "NN-NN" ratio.
    pub fn from_str_loose(s: &str) -> Option<FertilizerClass> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            None
        } else if lower.contains("urea") {
            Some(FertilizerClass::Urea)
        } else if lower.contains("potash") {
            Some(FertilizerClass::Potash)
        } else if lower.contains("phosphate") {
            Some(FertilizerClass::Phosphate)
        } else if NPK_RATIO.is_match(&lower) {
            Some(FertilizerClass::NpkRatio)
        } else {
            None
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            FertilizerClass::Urea => 1.05,
            FertilizerClass::Potash => 1.03,
            FertilizerClass::Phosphate => 1.00,
            FertilizerClass::NpkRatio => 1.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for IrrigationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrigationLevel::Low => write!(f, "Low"),
            IrrigationLevel::Medium => write!(f, "Medium"),
            IrrigationLevel::High => write!(f, "High"),
        }
    }
}

impl IrrigationLevel {
    pub const LOW_BELOW_MM: f64 = 3.0;
    pub const MEDIUM_UP_TO_MM: f64 = 6.0;

    /// Both 3.0 and 6.0 mm/day fall in Medium.
    pub fn from_mm_per_day(mm_per_day: f64) -> IrrigationLevel {
        if mm_per_day < Self::LOW_BELOW_MM {
            IrrigationLevel::Low
        } else if mm_per_day <= Self::MEDIUM_UP_TO_MM {
            IrrigationLevel::Medium
        } else {
            IrrigationLevel::High
        }
    }
}

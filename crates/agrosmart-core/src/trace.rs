use crate::estimate::scoring::{
    DEFAULT_NUTRIENT_SCORE, WEIGHT_HUMIDITY, WEIGHT_MOISTURE, WEIGHT_NUTRIENT, WEIGHT_TEMPERATURE,
};
use crate::estimate::Assessment;
use crate::model::IrrigationLevel;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    LookupReading,
    ResolveBaseline,
    ScoreTemperature,
    ScoreHumidity,
    ScoreMoisture,
    ScoreNutrients,
    CombineIndex,
    SoilMultiplier,
    FertilizerMultiplier,
    FinalRequirement,
    Categorize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    pub message: String,
    pub severity: TraceSeverity,
}

/// Step-by-step account of how an estimate was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateTrace {
    pub trace_schema_version: String,
    pub crop_key: String,
    pub steps: Vec<TraceStep>,
    /// Defaults that were applied in place of missing or unrecognized data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

fn step(step_type: TraceStepType, message: String) -> TraceStep {
    TraceStep { step_type, message }
}

pub fn build_trace(a: &Assessment) -> EstimateTrace {
    let r = &a.reading;
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    steps.push(step(
        TraceStepType::LookupReading,
        format!(
            "Reading for '{}': {}°C, {}% humidity, {}% moisture, soil '{}', N {} P {} K {}, fertilizer '{}'",
            a.crop_key,
            r.temperature,
            r.humidity,
            r.moisture,
            r.soil_type,
            r.nitrogen,
            r.phosphorous,
            r.potassium,
            r.fertilizer_name
        ),
    ));

    if a.baseline_defaulted {
        steps.push(step(
            TraceStepType::ResolveBaseline,
            format!("No baseline for '{}' -> default {} mm/day", a.crop_key, a.baseline_mm_per_day),
        ));
        warnings.push(TraceWarning {
            message: format!("'{}' has no baseline water requirement; used the default", a.crop_key),
            severity: TraceSeverity::Important,
        });
    } else {
        steps.push(step(
            TraceStepType::ResolveBaseline,
            format!("Baseline {} mm/day", a.baseline_mm_per_day),
        ));
    }

    steps.push(step(
        TraceStepType::ScoreTemperature,
        format!("S_temp = clamp(({} - 10) / 30) = {:.4}", r.temperature, a.scores.temperature),
    ));
    steps.push(step(
        TraceStepType::ScoreHumidity,
        format!("S_hum = clamp(1 - {} / 100) = {:.4}", r.humidity, a.scores.humidity),
    ));
    steps.push(step(
        TraceStepType::ScoreMoisture,
        format!("S_moist = clamp(1 - {} / 100) = {:.4}", r.moisture, a.scores.moisture),
    ));

    match &a.optimal_nutrients {
        Some(opt) => steps.push(step(
            TraceStepType::ScoreNutrients,
            format!(
                "S_nutrient = mean deficiency vs optimum N {} P {} K {} = {:.4}",
                opt.nitrogen, opt.phosphorous, opt.potassium, a.scores.nutrient
            ),
        )),
        None => {
            steps.push(step(
                TraceStepType::ScoreNutrients,
                format!("No nutrient optimum -> S_nutrient = {DEFAULT_NUTRIENT_SCORE}"),
            ));
            warnings.push(TraceWarning {
                message: format!("'{}' has no optimal nutrient profile; used a moderate deficiency", a.crop_key),
                severity: TraceSeverity::Info,
            });
        }
    }

    steps.push(step(
        TraceStepType::CombineIndex,
        format!(
            "I_index = {WEIGHT_TEMPERATURE}*{:.4} + {WEIGHT_HUMIDITY}*{:.4} + {WEIGHT_MOISTURE}*{:.4} + {WEIGHT_NUTRIENT}*{:.4} = {:.4}",
            a.scores.temperature, a.scores.humidity, a.scores.moisture, a.scores.nutrient, a.irrigation_index
        ),
    ));

    match a.soil_type {
        Some(soil) => steps.push(step(
            TraceStepType::SoilMultiplier,
            format!("Soil '{}' -> M_soil = {}", soil, a.soil_multiplier),
        )),
        None => {
            steps.push(step(
                TraceStepType::SoilMultiplier,
                format!("Unrecognized soil '{}' -> M_soil = {}", r.soil_type, a.soil_multiplier),
            ));
            warnings.push(TraceWarning {
                message: format!("soil type '{}' is not recognized; no soil adjustment applied", r.soil_type),
                severity: TraceSeverity::Info,
            });
        }
    }

    match a.fertilizer {
        Some(class) => steps.push(step(
            TraceStepType::FertilizerMultiplier,
            format!(
                "Fertilizer '{}' ({}) -> M_fert = {}",
                r.fertilizer_name, class, a.fertilizer_multiplier
            ),
        )),
        None => {
            steps.push(step(
                TraceStepType::FertilizerMultiplier,
                format!(
                    "Unrecognized fertilizer '{}' -> M_fert = {}",
                    r.fertilizer_name, a.fertilizer_multiplier
                ),
            ));
            warnings.push(TraceWarning {
                message: format!(
                    "fertilizer '{}' is not recognized; no fertilizer adjustment applied",
                    r.fertilizer_name
                ),
                severity: TraceSeverity::Info,
            });
        }
    }

    steps.push(step(
        TraceStepType::FinalRequirement,
        format!(
            "{} * (1 + {:.4}) * {} * {} = {:.4} mm/day",
            a.baseline_mm_per_day,
            a.irrigation_index,
            a.soil_multiplier,
            a.fertilizer_multiplier,
            a.mm_per_day
        ),
    ));

    let rule = match a.level {
        IrrigationLevel::Low => format!("< {}", IrrigationLevel::LOW_BELOW_MM),
        IrrigationLevel::Medium => format!(
            "{} to {}",
            IrrigationLevel::LOW_BELOW_MM,
            IrrigationLevel::MEDIUM_UP_TO_MM
        ),
        IrrigationLevel::High => format!("> {}", IrrigationLevel::MEDIUM_UP_TO_MM),
    };
    steps.push(step(
        TraceStepType::Categorize,
        format!("{:.4} mm/day is {} -> {}", a.mm_per_day, rule, a.level),
    ));

    EstimateTrace {
        trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
        crop_key: a.crop_key.clone(),
        steps,
        warnings,
    }
}

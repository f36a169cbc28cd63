use agrosmart_core::error::AgroError;
use agrosmart_core::estimate::IrrigationResult;
use agrosmart_core::trace::EstimateTrace;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), AgroError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// The result object with an extra `trace` field.
pub fn print_with_trace(result: &IrrigationResult, trace: &EstimateTrace) -> Result<(), AgroError> {
    let mut value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("trace".to_string(), serde_json::to_value(trace)?);
    }
    print(&value)
}

use agrosmart_core::error::AgroError;
use agrosmart_core::estimate::FailureReport;

use crate::commands::DatasetArgs;
use crate::output;

pub fn run(
    args: &DatasetArgs,
    crop: &str,
    output_format: &str,
    verbose: bool,
    with_trace: bool,
) -> Result<(), AgroError> {
    let config = args.resolve()?;
    let profiles = agrosmart_core::load_configured_profiles(&config)?;
    let dataset = agrosmart_core::open_dataset(&config.dataset);

    let outcome = agrosmart_core::estimate_with_trace(crop, &dataset, &profiles);

    let (result, trace) = match outcome {
        Ok(pair) => pair,
        Err(e) => {
            if output_format == "json" {
                output::json::print(&FailureReport::from_error(&e))?;
            }
            return Err(e);
        }
    };

    match output_format {
        "json" if with_trace => output::json::print_with_trace(&result, &trace)?,
        "json" => output::json::print(&result)?,
        _ => output::table::print_result(&result, verbose.then_some(&trace)),
    }

    Ok(())
}

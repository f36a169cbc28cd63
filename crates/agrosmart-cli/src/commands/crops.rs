use agrosmart_core::dataset::ReferenceData;
use agrosmart_core::error::AgroError;
use serde_json::json;

use crate::commands::DatasetArgs;
use crate::output;

pub fn run(args: &DatasetArgs, output_format: &str) -> Result<(), AgroError> {
    let config = args.resolve()?;
    let profiles = agrosmart_core::load_configured_profiles(&config)?;
    let dataset = agrosmart_core::open_dataset(&config.dataset);

    let crops = dataset.crop_keys();
    if crops.is_empty() {
        eprintln!("No crops available. The dataset is empty or could not be loaded.");
    }

    match output_format {
        "json" => {
            let entries: Vec<_> = crops
                .iter()
                .map(|crop| {
                    json!({
                        "crop": crop,
                        "has_baseline": profiles.baseline(crop).is_some(),
                        "has_optimal_nutrients": profiles.optimal_nutrients(crop).is_some(),
                    })
                })
                .collect();
            output::json::print(&entries)?;
        }
        _ => output::table::print_crops(&crops, &profiles),
    }

    Ok(())
}

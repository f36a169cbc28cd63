use agrosmart_core::error::AgroError;
use agrosmart_core::estimate::normalize_crop_key;
use std::path::Path;

use crate::commands::DatasetArgs;
use crate::output;

pub fn list(args: &DatasetArgs) -> Result<(), AgroError> {
    let config = args.resolve()?;
    let profiles = agrosmart_core::load_configured_profiles(&config)?;
    output::table::print_profiles(&profiles);
    Ok(())
}

pub fn show(args: &DatasetArgs, crop: &str) -> Result<(), AgroError> {
    let config = args.resolve()?;
    let profiles = agrosmart_core::load_configured_profiles(&config)?;
    let key = normalize_crop_key(crop)?;

    println!("{} ({} v{})\n", key, profiles.name, profiles.version);

    match profiles.baseline(&key) {
        Some(b) => println!("  Baseline:        {} mm/day", b),
        None => println!(
            "  Baseline:        {} mm/day (default, no entry for this crop)",
            profiles.default_baseline_mm_per_day
        ),
    }

    match profiles.optimal_nutrients(&key) {
        Some(opt) => println!(
            "  Optimal N-P-K:   {} / {} / {}",
            opt.nitrogen, opt.phosphorous, opt.potassium
        ),
        None => println!("  Optimal N-P-K:   none (nutrient score defaults to 0.5)"),
    }

    if let Some(note) = profiles.crops.get(&key).and_then(|p| p.note.as_deref()) {
        println!("  Note:            {}", note);
    }
    println!();

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), AgroError> {
    let set = agrosmart_core::profiles::load_profiles(file)?;

    println!("Crop profiles '{}' (v{}) are valid.", set.name, set.version);
    println!("  Crops: {}", set.crops.len());
    println!("  Default baseline: {} mm/day", set.default_baseline_mm_per_day);

    // Partial profiles are allowed but worth pointing out
    let mut warnings = Vec::new();
    for (key, profile) in &set.crops {
        if profile.baseline_mm_per_day.is_none() {
            warnings.push(format!("crop '{}' has no baseline; the default will be used", key));
        }
        if profile.optimal_nutrients.is_none() {
            warnings.push(format!(
                "crop '{}' has no optimal nutrients; nutrient score will default to 0.5",
                key
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

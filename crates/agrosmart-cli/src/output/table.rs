use agrosmart_core::estimate::IrrigationResult;
use agrosmart_core::profiles::schema::CropProfileSet;
use agrosmart_core::trace::EstimateTrace;

pub fn print_result(result: &IrrigationResult, trace: Option<&EstimateTrace>) {
    println!("=== {} ===\n", result.crop);

    println!(
        "  Irrigation: {} mm/day ({} L/ha/day) -> {}\n",
        result.irrigation_mm_per_day, result.irrigation_liters_per_ha_per_day, result.irrigation_level
    );

    let e = &result.explanation;
    println!("  Factors:");
    println!("    {:<22} {}", "Temperature score", e.temperature_score);
    println!("    {:<22} {}", "Humidity score", e.humidity_score);
    println!("    {:<22} {}", "Moisture score", e.moisture_score);
    println!("    {:<22} {}", "Nutrient deficiency", e.nutrient_score);
    println!("    {:<22} {}", "Irrigation index", e.irrigation_index);
    println!("    {:<22} {}", "Soil multiplier", e.soil_multiplier);
    println!("    {:<22} {}", "Fertilizer multiplier", e.fertilizer_multiplier);
    println!();

    let d = &result.crop_data;
    println!("  Reading:");
    println!(
        "    {}°C, {}% humidity, {}% soil moisture, {} soil",
        d.temperature, d.humidity, d.moisture, d.soil_type
    );
    println!(
        "    N {}  P {}  K {}  fertilizer '{}'",
        d.nitrogen, d.phosphorous, d.potassium, d.fertilizer_name
    );
    println!();

    let Some(trace) = trace else {
        return;
    };

    println!("  Steps:");
    for (i, step) in trace.steps.iter().enumerate() {
        println!("    {:>2}. {}", i + 1, step.message);
    }
    println!();

    if !trace.warnings.is_empty() {
        println!("  Defaults applied:");
        for w in &trace.warnings {
            println!("    - {}", w.message);
        }
        println!();
    }
}

pub fn print_crops(crops: &[String], profiles: &CropProfileSet) {
    if crops.is_empty() {
        return;
    }

    let max_name = crops.iter().map(|c| c.len()).max().unwrap_or(10).max(4);

    println!("  {:<width$}  {:>10}  {:>16}", "Crop", "Baseline", "Optimal N-P-K", width = max_name);
    println!("  {}", "-".repeat(max_name + 2 + 10 + 2 + 16));

    for crop in crops {
        let baseline = match profiles.baseline(crop) {
            Some(b) => format!("{}", b),
            None => format!("{}*", profiles.default_baseline_mm_per_day),
        };
        let npk = match profiles.optimal_nutrients(crop) {
            Some(opt) => format!("{}-{}-{}", opt.nitrogen, opt.phosphorous, opt.potassium),
            None => "-".to_string(),
        };
        println!("  {:<width$}  {:>10}  {:>16}", crop, baseline, npk, width = max_name);
    }

    println!();
    println!("  {} crop(s). * = default baseline (mm/day)", crops.len());
}

pub fn print_profiles(profiles: &CropProfileSet) {
    println!("{} (version {})\n", profiles.name, profiles.version);

    if let Some(ref desc) = profiles.description {
        println!("{}\n", desc);
    }

    let max_name = profiles
        .crops
        .keys()
        .map(|k| k.len())
        .max()
        .unwrap_or(10)
        .max(4);

    println!(
        "  {:<width$}  {:>14}  {:>8}  {:>8}  {:>8}",
        "Crop",
        "Baseline mm/d",
        "N",
        "P",
        "K",
        width = max_name
    );
    println!("  {}", "-".repeat(max_name + 2 + 14 + 3 * 10));

    for (key, profile) in &profiles.crops {
        let baseline = profile
            .baseline_mm_per_day
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".into());
        let (n, p, k) = match profile.optimal_nutrients {
            Some(opt) => (
                opt.nitrogen.to_string(),
                opt.phosphorous.to_string(),
                opt.potassium.to_string(),
            ),
            None => ("-".into(), "-".into(), "-".into()),
        };
        println!(
            "  {:<width$}  {:>14}  {:>8}  {:>8}  {:>8}",
            key,
            baseline,
            n,
            p,
            k,
            width = max_name
        );
    }

    println!();
    println!(
        "Crops without a profile use a baseline of {} mm/day and a nutrient score of 0.5.",
        profiles.default_baseline_mm_per_day
    );
    println!();
}

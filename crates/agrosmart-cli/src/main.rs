mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::DatasetArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrosmart",
    version,
    about = "Irrigation requirement estimator for crop, soil and climate readings"
)]
struct Cli {
    #[command(flatten)]
    dataset: DatasetArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate daily irrigation for a crop
    Estimate {
        /// Crop name (case-insensitive), e.g. "rice"
        crop: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show how each factor was derived
        #[arg(long)]
        verbose: bool,

        /// Include the step-by-step trace in JSON output
        #[arg(long)]
        trace: bool,
    },
    /// List crops available in the reference dataset
    Crops {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate crop profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List crop profiles (baseline and optimal N-P-K)
    List,
    /// Show the profile used for one crop
    Show {
        /// Crop name (case-insensitive)
        crop: String,
    },
    /// Validate a custom crop profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Estimate {
            crop,
            output,
            verbose,
            trace,
        } => commands::estimate::run(&cli.dataset, &crop, &output, verbose, trace),
        Commands::Crops { output } => commands::crops::run(&cli.dataset, &output),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(&cli.dataset),
            ProfilesAction::Show { crop } => commands::profiles::show(&cli.dataset, &crop),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        log::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

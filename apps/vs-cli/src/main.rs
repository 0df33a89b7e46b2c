mod casefile;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vs_core::Scalar;
use vs_data::ReferenceStore;
use vs_engine::{Opening, Scenario, ScenarioReport, ScenarioSet, SizingCase};

#[derive(Parser)]
#[command(name = "vs-cli")]
#[command(about = "ValveSize CLI - control valve sizing tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a reference data directory
    Validate {
        /// Path to the data directory
        data_dir: PathBuf,
    },
    /// List the valves and fluids in a reference data directory
    List {
        /// Path to the data directory
        data_dir: PathBuf,
    },
    /// Evaluate a sizing case file
    Size {
        /// Path to the data directory
        data_dir: PathBuf,
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Data(#[from] vs_data::DataError),

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unknown valve '{0}'")]
    UnknownValve(String),

    #[error("Unknown fluid '{0}'")]
    UnknownFluid(String),
}

fn main() -> Result<(), CliError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { data_dir } => cmd_validate(&data_dir),
        Commands::List { data_dir } => cmd_list(&data_dir),
        Commands::Size {
            data_dir,
            case_path,
        } => cmd_size(&data_dir, &case_path),
    }
}

fn cmd_validate(data_dir: &Path) -> Result<(), CliError> {
    println!("Validating reference data: {}", data_dir.display());
    let store = ReferenceStore::load(data_dir)?;
    println!(
        "✓ Reference data is valid ({} valves, {} fluids)",
        store.valves().count(),
        store.fluids().count()
    );
    Ok(())
}

fn cmd_list(data_dir: &Path) -> Result<(), CliError> {
    let store = ReferenceStore::load(data_dir)?;

    println!("Valves:");
    for name in store.valve_names() {
        if let Some(valve) = store.valve(name) {
            let diameters = valve
                .dimensionable_diameters()
                .iter()
                .map(|d| format!("{d}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {} ({:?}, diameters: {} in)", name, valve.style, diameters);
        }
    }

    println!("Fluids:");
    for name in store.fluid_names() {
        if let Some(fluid) = store.fluid(name) {
            if fluid.is_custom() {
                println!("  {} (properties entered per case)", name);
            } else {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}

fn cmd_size(data_dir: &Path, case_path: &Path) -> Result<(), CliError> {
    let store = ReferenceStore::load(data_dir)?;
    let case = casefile::load(case_path)?;

    let valve = store
        .valve(&case.valve)
        .ok_or_else(|| CliError::UnknownValve(case.valve.clone()))?;
    let fluid = store
        .fluid(&case.fluid)
        .ok_or_else(|| CliError::UnknownFluid(case.fluid.clone()))?;

    let (specific_gravity, vapor_pressure, viscosity) = case.fluid_properties(fluid);

    let set = ScenarioSet {
        valve,
        reynolds_correction: store.reynolds_correction(),
        diameter: Scalar::new(case.diameter_in),
        specific_gravity,
        vapor_pressure,
        viscosity,
        safety_factor: case.safety_factor,
        minimum: case.operating_point(&case.minimum),
        normal: case.operating_point(&case.normal),
        maximum: case.operating_point(&case.maximum),
    };
    let report = set.run();

    print_report(&case, valve.max_opening, &report);
    Ok(())
}

fn print_report(case: &casefile::CaseFile, max_opening: f64, report: &ScenarioReport) {
    println!(
        "Sizing '{}' at {} in, fluid '{}'",
        case.valve, case.diameter_in, case.fluid
    );
    if let Some(t) = case.temperature_c {
        println!("Fluid properties resolved at {t} °C");
    }
    println!();

    println!(
        "{:<28}{:>12}{:>12}{:>12}",
        "", "minimum", "normal", "maximum"
    );
    print_row("Flow (GPM)", report, |c| fmt_scalar(c.flow));
    print_row("ΔP (PSI)", report, |c| fmt_scalar(c.pressure_differential));
    print_row("Reynolds number", report, |c| fmt_scalar(c.reynolds_number));
    print_row("Correction factor", report, |c| {
        fmt_scalar(c.correction_factor)
    });
    print_row("Cv", report, |c| fmt_scalar(c.cv));
    print_row("Opening (%)", report, |c| fmt_opening(c.opening, max_opening));
    print_row("FL", report, |c| fmt_scalar(c.fl));
    print_row("Allowable ΔP (PSI)", report, |c| {
        fmt_scalar(c.allowable_pressure_differential)
    });
    print_row("Velocity (ft/s)", report, |c| fmt_scalar(c.velocity));
    println!();

    println!("Max velocity: {} ft/s", fmt_scalar(report.max_velocity));
    println!("Estimated noise: {} dB", fmt_scalar(report.normal.noise));
    println!(
        "Cavitation: {}   Flashing: {}   Erosion: {}",
        fmt_flag(report.flags.is_cavitating),
        fmt_flag(report.flags.is_flashing),
        fmt_flag(report.flags.is_eroding)
    );
    println!(
        "Opening below 20%: {}   Opening above travel: {}",
        fmt_flag(report.flags.opening_too_small),
        fmt_flag(report.flags.opening_too_big)
    );
}

fn print_row(label: &str, report: &ScenarioReport, value: impl Fn(&SizingCase) -> String) {
    println!(
        "{:<28}{:>12}{:>12}{:>12}",
        label,
        value(report.case(Scenario::Minimum)),
        value(report.case(Scenario::Normal)),
        value(report.case(Scenario::Maximum))
    );
}

fn fmt_scalar(value: Scalar) -> String {
    match value.get() {
        Some(v) => format!("{v:.1}"),
        None => "—".to_string(),
    }
}

fn fmt_opening(opening: Option<Opening>, max_opening: f64) -> String {
    match opening {
        Some(Opening::At(p)) => format!("{p:.1}"),
        Some(Opening::BeyondTravel) => format!(">{max_opening:.0}"),
        None => "—".to_string(),
    }
}

fn fmt_flag(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "YES".to_string(),
        Some(false) => "no".to_string(),
        None => "—".to_string(),
    }
}

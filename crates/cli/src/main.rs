use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod demo;

use config::{CliConfig, OutputFormat, OUTPUT_FORMAT_ENV};

#[derive(Parser)]
#[command(name = "casesim")]
#[command(about = "Simulated medical case records with change tracking")]
struct Cli {
    /// Output format (overrides CASESIM_OUTPUT_FORMAT)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bundled chest pain case, record two physical exams and print it
    Demo,
    /// Load a case document and print it
    Show {
        /// Case document (.json for JSON, anything else is read as YAML)
        case_file: PathBuf,
    },
    /// Load a case document, apply one update and print the result
    Update {
        /// Case document
        case_file: PathBuf,
        /// Dynamic field to update
        field: String,
        /// New value as JSON (non-JSON input is taken as a plain string)
        value: String,
    },
    /// Load a case document, apply a list of updates and print the change log
    Replay {
        /// Case document
        case_file: PathBuf,
        /// YAML list of `{field, value}` updates
        updates_file: PathBuf,
    },
    /// List dynamic and static field names
    Fields,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("casesim=info,case_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CliConfig::resolve(cli.format, std::env::var(OUTPUT_FORMAT_ENV).ok())?;
    tracing::debug!(format = %cfg.output_format(), "configuration resolved");

    let output = match cli.command {
        Some(Commands::Demo) => commands::demo(&cfg)?,
        Some(Commands::Show { case_file }) => commands::show(&cfg, &case_file)?,
        Some(Commands::Update {
            case_file,
            field,
            value,
        }) => commands::update(&cfg, &case_file, &field, &value)?,
        Some(Commands::Replay {
            case_file,
            updates_file,
        }) => commands::replay(&cfg, &case_file, &updates_file)?,
        Some(Commands::Fields) => commands::fields(),
        None => "Use 'casesim --help' for commands".to_string(),
    };

    println!("{}", output.trim_end());
    Ok(())
}

//! prakriti CLI: take the questionnaire, score answers, inspect results.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::OutputFormat;

mod commands;
mod config;
mod presentation;

#[derive(Parser)]
#[command(name = "prakriti", version, about = "Ayurvedic constitution questionnaire")]
struct Cli {
    /// Config file path (default: ./prakriti.toml, then ~/.config/prakriti/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the questions in a catalog
    Questions {
        /// Catalog TOML file (default: built-in questionnaire)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Answer the questionnaire interactively
    Take {
        /// Catalog TOML file (default: built-in questionnaire)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Profile file (TOML or JSON)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Save the result to this .json file or directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Score a complete set of answers
    Score {
        /// Zero-based option indices, one per question (e.g. "0,2,1,...")
        #[arg(long)]
        answers: Option<String>,

        /// TOML or JSON file with `answers = [...]`
        #[arg(long)]
        answers_file: Option<PathBuf>,

        /// Catalog TOML file (default: built-in questionnaire)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Profile file (TOML or JSON)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Save the result to this .json file or directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Display a saved result
    Show {
        /// Result JSON file
        #[arg(long)]
        result: PathBuf,

        /// Profile file (TOML or JSON)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute body mass index
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimetres
        #[arg(long)]
        height: f64,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Create starter config, catalog and profile
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("prakriti=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // init, validate and bmi work without a readable config.
    let config = || config::load_config_from(cli.config.as_deref());

    match cli.command {
        Commands::Questions { catalog } => commands::questions::execute(catalog, &config()?),
        Commands::Take {
            catalog,
            profile,
            output,
            format,
        } => commands::take::execute(catalog, profile, output, format, &config()?),
        Commands::Score {
            answers,
            answers_file,
            catalog,
            profile,
            output,
            format,
        } => commands::score::execute(
            answers,
            answers_file,
            catalog,
            profile,
            output,
            format,
            &config()?,
        ),
        Commands::Show {
            result,
            profile,
            format,
        } => commands::show::execute(result, profile, format, &config()?),
        Commands::Bmi { weight, height } => commands::bmi::execute(weight, height),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Init => commands::init::execute(),
    }
}

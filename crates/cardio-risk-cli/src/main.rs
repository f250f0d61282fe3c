mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::assess::{FormArgs, InputArgs};

/// Rule-based cardiovascular risk assessment
#[derive(Parser)]
#[command(
    name = "cardio",
    version,
    about = "Rule-based cardiovascular risk assessment",
    long_about = "Validates eleven clinical measurements and estimates a cardiovascular \
                  risk percentage, risk tier, contributing factors and recommendations \
                  with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Scoring configuration file (JSON or YAML) replacing the default weight table
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log scoring details to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a raw form and estimate risk
    Assess(FormArgs),
    /// Validate a raw form without scoring it
    Validate(FormArgs),
    /// Score a typed clinical input
    Score(InputArgs),
    /// Show the weighted contribution of every feature
    Breakdown(InputArgs),
    /// Print the form field catalog
    Fields,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args, config),
        Commands::Validate(args) => commands::assess::run_validate(args),
        Commands::Score(args) => commands::assess::run_score(args, config),
        Commands::Breakdown(args) => commands::assess::run_breakdown(args, config),
        Commands::Fields => commands::fields::run_fields(),
        Commands::Version => {
            println!("cardio {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

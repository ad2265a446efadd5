mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::affordability::AffordabilityArgs;
use commands::amortization::AmortizeArgs;
use commands::analysis::AnalyzeArgs;
use commands::sensitivity::SweepArgs;

/// Mortgage amortization, rate sensitivity and affordability
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage amortization, rate sensitivity and affordability",
    long_about = "A CLI for mortgage calculations with decimal precision. Computes level \
                  monthly payments and amortization schedules, sweeps interest rates, \
                  checks funds needed to close, and runs a full purchase analysis \
                  including PMI, property tax and insurance."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, totals and amortization schedule for one rate
    Amortize(AmortizeArgs),
    /// Compare payments across a range of interest rates
    Sweep(SweepArgs),
    /// Check whether savings cover down payment, closing and moving costs
    Affordability(AffordabilityArgs),
    /// Full purchase analysis from a JSON or YAML input
    Analyze(AnalyzeArgs),
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

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Sweep(args) => commands::sensitivity::run_sweep(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

use clap::Args;
use serde_json::Value;

use mortgage_core::analysis::{self, MortgageAnalysisInput};

use crate::input;

/// Arguments for a full purchase analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON or YAML file with the analysis inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Include the exact-rate schedule in the output
    #[arg(long)]
    pub schedule: bool,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: MortgageAnalysisInput = input::load(args.input.as_deref())?
        .ok_or("--input <file.json|file.yaml> or stdin required for mortgage analysis")?;

    let result = analysis::analyze_mortgage(&analysis_input)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }

    let mut value = serde_json::to_value(result)?;
    if !args.schedule {
        super::strip_schedules(&mut value);
    }
    Ok(value)
}

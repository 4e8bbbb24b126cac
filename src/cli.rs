use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::models::RiskLevel;

#[derive(Parser, Debug)]
#[command(
    name = "supply-checkr",
    about = "Score package metadata for supply-chain risk",
    version
)]
pub struct Cli {
    /// CSV file with name, ecosystem, last_updated and downloads columns
    #[arg(default_value = "packages_metadata.csv")]
    pub input: PathBuf,

    /// Where to write the enriched CSV
    #[arg(short, long, value_name = "FILE", default_value = "enhanced_supply_chain_risks.csv")]
    pub output: PathBuf,

    /// Config file [default: ./.supply-checkr/config.toml, fallback ~/.config/supply-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Render a stacked bar chart (PNG); use without value to default to risk_levels_by_ecosystem.png
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "risk_levels_by_ecosystem.png")]
    pub chart: Option<PathBuf>,

    /// Evaluate dates as of this day (YYYY-MM-DD) instead of now
    #[arg(long, value_name = "DATE", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Exit with status 1 if any package is at or above this level
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnArg>,

    /// Show detector details for every package
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FailOnArg {
    Medium,
    High,
}

impl From<FailOnArg> for RiskLevel {
    fn from(arg: FailOnArg) -> Self {
        match arg {
            FailOnArg::Medium => RiskLevel::Medium,
            FailOnArg::High => RiskLevel::High,
        }
    }
}

fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    crate::detector::temporal::parse_date(raw).map_err(|e| e.to_string())
}

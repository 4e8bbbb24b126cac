//! `supply-checkr` — score package metadata for supply-chain risk.
//!
//! # Flow
//! 1. Parse CLI arguments.
//! 2. Load detection config and reference packages.
//! 3. Read the package table.
//! 4. Run the detectors and score every package.
//! 5. Write the enriched table.
//! 6. Render the requested report and optional chart.
//! 7. Exit `0`, or `1` when `--fail-on` is set and a package reaches that level.

use anyhow::Result;
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use supply_checkr::cli::{Cli, ReportFormat};
use supply_checkr::config::load_config;
use supply_checkr::models::{EnrichedTable, RiskLevel};
use supply_checkr::pipeline::Pipeline;
use supply_checkr::report::{self, summarize_by_ecosystem};
use supply_checkr::table;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    // The only place the wall clock is read.
    let now: NaiveDateTime = match cli.as_of {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    };

    let table = table::reader::read_packages(&cli.input)?;
    if !cli.quiet {
        eprintln!(
            "  {} loaded {} packages from {}",
            "→".cyan(),
            table.records.len(),
            cli.input.display()
        );
    }

    let pipeline = Pipeline::new(config.detection.clone(), config.references.clone());
    let enriched = EnrichedTable {
        records: pipeline.run(&table.records, now),
        headers: table.headers,
    };

    table::writer::write_enriched(&cli.output, &enriched)?;
    if !cli.quiet {
        eprintln!(
            "  {} results saved to {}",
            "→".cyan(),
            cli.output.display()
        );
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &enriched.records,
                &cli.input,
                &config.references,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&enriched.records)?);
        }
    }

    if let Some(chart_path) = &cli.chart {
        let written = report::chart::render(&summarize_by_ecosystem(&enriched.records), chart_path)?;
        if written && !cli.quiet {
            eprintln!(
                "  {} chart written to {}",
                "→".cyan(),
                chart_path.display()
            );
        }
    }

    if let Some(fail_on) = cli.fail_on {
        let floor = RiskLevel::from(fail_on);
        let failing = enriched
            .records
            .iter()
            .filter(|r| r.risk_level >= floor)
            .count();
        if failing > 0 {
            eprintln!(
                "{} {} package(s) at or above {} risk",
                "✗".red(),
                failing,
                floor
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

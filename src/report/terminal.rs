use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::detector::similarity::closest_reference;
use crate::models::{EnrichedPackageRecord, RiskLevel};
use crate::pipeline::ReferenceSet;
use crate::report::{summarize_by_ecosystem, LevelCounts};

/// Render a colored terminal report.
pub fn render(
    records: &[EnrichedPackageRecord],
    input: &Path,
    references: &ReferenceSet,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let counts = LevelCounts::from_records(records);
    let low = counts.get(RiskLevel::Low);
    let medium = counts.get(RiskLevel::Medium);
    let high = counts.get(RiskLevel::High);

    if quiet {
        println!(
            "Total: {}  Low: {}  Medium: {}  High: {}",
            counts.total(),
            low.to_string().green(),
            medium.to_string().yellow(),
            high.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "supply-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Input: {}\n", input.display());

    let flagged = |pick: fn(&EnrichedPackageRecord) -> bool| records.iter().filter(|r| pick(r)).count();

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total packages     : {}", counts.total()));
    println!(
        " │  {:<48} │",
        format!(
            "Flags (typo/abandoned/revived): {}/{}/{}",
            flagged(|r| r.typo_suspect),
            flagged(|r| r.abandoned),
            flagged(|r| r.revived_risk),
        )
    );
    println!(" │  {:<48} │", format!("{}  High            : {:>4}", "✗".red(), high));
    println!(" │  {:<48} │", format!("{}  Medium          : {:>4}", "⚠".yellow(), medium));
    println!(" │  {:<48} │", format!("{}  Low             : {:>4}", "✓".green(), low));
    println!(" └────────────────────────────────────────────────────┘\n");

    if !records.is_empty() {
        println!(" {} Scored packages:\n", "[PACKAGES]".bold());
        render_packages(records, references, verbose);
        println!();

        println!(" {} Risk levels by ecosystem:\n", "[ECOSYSTEMS]".bold());
        render_ecosystems(records);
        println!();
    }

    Ok(())
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).add_attribute(Attribute::Bold))
        .collect()
}

fn level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn flag_cell(value: bool) -> Cell {
    let cell = if value {
        Cell::new("yes").fg(Color::Red)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    };
    cell.set_alignment(CellAlignment::Center)
}

fn render_packages(records: &[EnrichedPackageRecord], references: &ReferenceSet, verbose: bool) {
    let mut labels = vec!["Name", "Ecosystem", "Typo", "Abandoned", "Revived", "Risk"];
    if verbose {
        labels.extend(["Last updated", "Downloads", "Score", "Closest reference"]);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&labels));

    for record in records {
        let package = &record.package;
        let mut row = vec![
            Cell::new(&package.name),
            Cell::new(&package.ecosystem),
            flag_cell(record.typo_suspect),
            flag_cell(record.abandoned),
            flag_cell(record.revived_risk),
            Cell::new(record.risk_level.to_string()).fg(level_color(record.risk_level)),
        ];

        if verbose {
            let closest = closest_reference(&package.name, references.for_ecosystem(&package.ecosystem))
                .map(|(name, ratio)| format!("{} ({:.2})", name, ratio))
                .unwrap_or_else(|| "-".to_string());
            row.extend([
                Cell::new(&package.last_updated),
                Cell::new(package.downloads).set_alignment(CellAlignment::Right),
                Cell::new(record.risk_score).set_alignment(CellAlignment::Right),
                Cell::new(closest),
            ]);
        }

        table.add_row(row);
    }

    println!("{}", table);
}

fn render_ecosystems(records: &[EnrichedPackageRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Ecosystem", "Low", "Medium", "High", "Total"]));

    for summary in summarize_by_ecosystem(records) {
        let mut row = vec![Cell::new(&summary.ecosystem)];
        for level in RiskLevel::ALL {
            row.push(
                Cell::new(summary.counts.get(level))
                    .fg(level_color(level))
                    .set_alignment(CellAlignment::Right),
            );
        }
        row.push(Cell::new(summary.counts.total()).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }

    println!("{}", table);
}

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;

use crate::models::RiskLevel;
use crate::report::EcosystemSummary;

const CHART_SIZE: (u32, u32) = (800, 500);
const BAR_GAP: u32 = 12;

/// One stacked segment: ecosystem index, level, and its `[bottom, top)` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    column: usize,
    level: RiskLevel,
    bottom: u32,
    top: u32,
}

fn level_color(level: RiskLevel) -> RGBColor {
    match level {
        RiskLevel::Low => RGBColor(67, 160, 71),
        RiskLevel::Medium => RGBColor(251, 140, 0),
        RiskLevel::High => RGBColor(229, 57, 53),
    }
}

/// Render a stacked bar chart (PNG) of risk levels per ecosystem.
///
/// Returns `false` when there is nothing to chart and no file was written.
pub fn render(summary: &[EcosystemSummary], output_path: &Path) -> Result<bool> {
    if summary.is_empty() {
        tracing::warn!(path = %output_path.display(), "no packages to chart, skipping");
        return Ok(false);
    }

    draw(summary, output_path)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to render chart to {}", output_path.display()))?;

    tracing::debug!(path = %output_path.display(), columns = summary.len(), "chart written");
    Ok(true)
}

/// Stack levels bottom-up in [`RiskLevel::ALL`] order; empty segments are dropped.
fn stack_segments(summary: &[EcosystemSummary]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (column, group) in summary.iter().enumerate() {
        let mut bottom = 0u32;
        for level in RiskLevel::ALL {
            let count = group.counts.get(level) as u32;
            if count == 0 {
                continue;
            }
            segments.push(Segment {
                column,
                level,
                bottom,
                top: bottom + count,
            });
            bottom += count;
        }
    }
    segments
}

fn draw(summary: &[EcosystemSummary], output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = summary.iter().map(|s| s.ecosystem.as_str()).collect();
    let tallest = summary
        .iter()
        .map(|s| s.counts.total())
        .max()
        .unwrap_or(0)
        .max(1) as u32;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Supply Chain Risk Levels by Ecosystem", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..tallest + tallest / 10 + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Ecosystem")
        .y_desc("Number of Packages")
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => labels.get(*idx).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    let segments = stack_segments(summary);
    for level in RiskLevel::ALL {
        let color = level_color(level);
        let bars = segments.iter().filter(|s| s.level == level).map(|s| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(s.column), s.bottom),
                    (SegmentValue::Exact(s.column + 1), s.top),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
            bar
        });

        chart
            .draw_series(bars)?
            .label(format!("Risk Level: {}", level))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::scored;
    use crate::report::summarize_by_ecosystem;

    #[test]
    fn test_segments_stack_low_to_high() {
        let records = vec![
            scored("a", "npm", RiskLevel::High),
            scored("b", "npm", RiskLevel::Low),
            scored("c", "npm", RiskLevel::Low),
            scored("d", "PyPI", RiskLevel::Medium),
        ];
        let segments = stack_segments(&summarize_by_ecosystem(&records));

        assert_eq!(
            segments,
            vec![
                Segment { column: 0, level: RiskLevel::Medium, bottom: 0, top: 1 },
                Segment { column: 1, level: RiskLevel::Low, bottom: 0, top: 2 },
                Segment { column: 1, level: RiskLevel::High, bottom: 2, top: 3 },
            ]
        );
    }

    #[test]
    fn test_empty_summary_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        assert!(!render(&[], &path).unwrap());
        assert!(!path.exists());
    }
}

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{EnrichedPackageRecord, EnrichedTable};

/// Columns appended to the input table, in output order.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "typo_suspect",
    "abandoned",
    "revived_risk",
    "risk_score",
    "risk_level",
];

/// Write the enriched table to `path` as CSV.
pub fn write_enriched(path: &Path, table: &EnrichedTable) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_to(file, table).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write every input column unchanged, followed by [`DERIVED_COLUMNS`].
///
/// An input column that already carries a derived name is overwritten in place.
pub fn write_to<W: Write>(writer: W, table: &EnrichedTable) -> Result<()> {
    let layout = ColumnLayout::new(&table.headers);
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(&layout.headers)?;
    for record in &table.records {
        wtr.write_record(layout.row(record))?;
    }
    wtr.flush()?;

    tracing::debug!(rows = table.records.len(), "wrote enriched table");
    Ok(())
}

struct ColumnLayout {
    headers: Vec<String>,
    input_width: usize,
    /// Output position of each entry of [`DERIVED_COLUMNS`].
    derived_at: [usize; 5],
}

impl ColumnLayout {
    fn new(input_headers: &[String]) -> Self {
        let mut headers = input_headers.to_vec();
        let mut derived_at = [0; 5];
        for (slot, column) in derived_at.iter_mut().zip(DERIVED_COLUMNS) {
            *slot = match headers.iter().position(|h| h == column) {
                Some(idx) => idx,
                None => {
                    headers.push(column.to_string());
                    headers.len() - 1
                }
            };
        }
        Self {
            headers,
            input_width: input_headers.len(),
            derived_at,
        }
    }

    fn row(&self, record: &EnrichedPackageRecord) -> Vec<String> {
        let mut cells = record.package.row.clone();
        cells.resize(self.input_width, String::new());
        cells.resize(self.headers.len(), String::new());

        let values = [
            flag(record.typo_suspect),
            flag(record.abandoned),
            flag(record.revived_risk),
            record.risk_score.to_string(),
            record.risk_level.to_string(),
        ];
        for (idx, value) in self.derived_at.iter().zip(values) {
            cells[*idx] = value;
        }
        cells
    }
}

fn flag(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

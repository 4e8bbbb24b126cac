use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::{PackageRecord, PackageTable};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid downloads value {value:?} for package `{name}`")]
    InvalidDownloads {
        row: usize,
        name: String,
        value: String,
    },
}

/// Read a CSV package table from `path`.
pub fn read_packages(path: &Path) -> Result<PackageTable> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_from(file).with_context(|| format!("Failed to read packages from {}", path.display()))
}

/// Parse a CSV package table.
///
/// The header must name `name`, `ecosystem`, `last_updated` and `downloads`;
/// any other columns are carried along untouched in [`PackageRecord::row`].
/// Every row must have a valid, non-negative integral `downloads` value.
pub fn read_from<R: Read>(reader: R) -> Result<PackageTable> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(TableError::MissingColumn(name))
    };
    let name_idx = column("name")?;
    let ecosystem_idx = column("ecosystem")?;
    let updated_idx = column("last_updated")?;
    let downloads_idx = column("downloads")?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row: Vec<String> = result?.iter().map(str::to_string).collect();
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();

        let name = cell(name_idx);
        let raw_downloads = cell(downloads_idx);
        let downloads = parse_downloads(&raw_downloads).ok_or_else(|| TableError::InvalidDownloads {
            row: i + 1,
            name: name.clone(),
            value: raw_downloads.clone(),
        })?;

        records.push(PackageRecord {
            name,
            ecosystem: cell(ecosystem_idx),
            last_updated: cell(updated_idx),
            downloads,
            row,
        });
    }

    tracing::debug!(rows = records.len(), columns = headers.len(), "read package table");
    Ok(PackageTable { headers, records })
}

/// Accept `50000` as well as integral floats like `50000.0`.
fn parse_downloads(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(count) = raw.parse::<u64>() {
        return Some(count);
    }
    let value: f64 = raw.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

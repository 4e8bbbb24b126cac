//! Report renderers for scored packages.
//!
//! - [`terminal`] — colored summary box and tables; respects `--verbose` / `--quiet`.
//! - [`chart`] — stacked bar chart of risk levels per ecosystem (PNG).

pub mod chart;
pub mod terminal;

use std::collections::BTreeMap;

use crate::models::{EnrichedPackageRecord, RiskLevel};

/// Package counts per risk level, indexed in [`RiskLevel::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts([usize; 3]);

impl LevelCounts {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EnrichedPackageRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.add(record.risk_level);
        }
        counts
    }

    pub fn add(&mut self, level: RiskLevel) {
        self.0[level as usize] += 1;
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        self.0[level as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Counts for one ecosystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcosystemSummary {
    pub ecosystem: String,
    pub counts: LevelCounts,
}

/// Group records by ecosystem, sorted by ecosystem label.
pub fn summarize_by_ecosystem(records: &[EnrichedPackageRecord]) -> Vec<EcosystemSummary> {
    let mut groups: BTreeMap<&str, LevelCounts> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.package.ecosystem.as_str())
            .or_default()
            .add(record.risk_level);
    }

    groups
        .into_iter()
        .map(|(ecosystem, counts)| EcosystemSummary {
            ecosystem: ecosystem.to_string(),
            counts,
        })
        .collect()
}

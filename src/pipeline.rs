use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info};

use crate::detector::similarity::{is_typosquat, DEFAULT_THRESHOLD};
use crate::detector::temporal::{
    is_abandoned, is_revived_with, RevivalRule, DEFAULT_ABANDONED_YEARS,
    DEFAULT_REVIVAL_DOWNLOADS, DEFAULT_REVIVAL_INACTIVE_DAYS,
};
use crate::models::{EnrichedPackageRecord, PackageRecord, RiskLevel};
use crate::risk::classifier::classify;
use crate::risk::scorer::score;

/// Built-in list of popular package names used when no config overrides it.
pub const DEFAULT_POPULAR_PACKAGES: [&str; 5] = ["requests", "numpy", "pandas", "react", "express"];

/// Popular package names that candidates are compared against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceSet {
    /// Used for every ecosystem without its own list.
    pub popular: Vec<String>,
    /// Per-ecosystem lists keyed by ecosystem label; these replace `popular`.
    pub ecosystems: BTreeMap<String, Vec<String>>,
}

impl ReferenceSet {
    pub fn new(popular: Vec<String>) -> Self {
        Self {
            popular,
            ecosystems: BTreeMap::new(),
        }
    }

    /// References for `ecosystem`, matched exactly first, then case-insensitively.
    ///
    /// Among labels that differ only in case, the first in byte order wins.
    pub fn for_ecosystem(&self, ecosystem: &str) -> &[String] {
        if let Some(list) = self.ecosystems.get(ecosystem) {
            return list;
        }
        self.ecosystems
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(ecosystem))
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&self.popular)
    }
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self::new(DEFAULT_POPULAR_PACKAGES.iter().map(|s| s.to_string()).collect())
    }
}

/// Thresholds and time windows for the detectors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectionRules {
    pub similarity_threshold: f64,
    pub abandoned_after_years: f64,
    pub revival_inactive_days: i64,
    pub revival_download_threshold: u64,
}

impl DetectionRules {
    pub fn revival(&self) -> RevivalRule {
        RevivalRule {
            inactive_days: self.revival_inactive_days,
            download_threshold: self.revival_download_threshold,
        }
    }
}

impl Default for DetectionRules {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            abandoned_after_years: DEFAULT_ABANDONED_YEARS,
            revival_inactive_days: DEFAULT_REVIVAL_INACTIVE_DAYS,
            revival_download_threshold: DEFAULT_REVIVAL_DOWNLOADS,
        }
    }
}

/// Runs every detector over each record and attaches score and level.
///
/// Records never influence each other: the result for one record depends only
/// on its own fields, the reference set and `now`.
pub struct Pipeline {
    rules: DetectionRules,
    references: ReferenceSet,
}

impl Pipeline {
    pub fn new(rules: DetectionRules, references: ReferenceSet) -> Self {
        Self { rules, references }
    }

    /// Enrich every record, preserving order and count.
    pub fn run(&self, records: &[PackageRecord], now: NaiveDateTime) -> Vec<EnrichedPackageRecord> {
        let enriched: Vec<EnrichedPackageRecord> =
            records.iter().map(|record| self.enrich(record, now)).collect();

        let count = |level: RiskLevel| enriched.iter().filter(|e| e.risk_level == level).count();
        info!(
            packages = enriched.len(),
            high = count(RiskLevel::High),
            medium = count(RiskLevel::Medium),
            low = count(RiskLevel::Low),
            %now,
            "risk scoring complete"
        );

        enriched
    }

    pub fn enrich(&self, record: &PackageRecord, now: NaiveDateTime) -> EnrichedPackageRecord {
        let references = self.references.for_ecosystem(&record.ecosystem);

        let typo_suspect =
            is_typosquat(&record.name, references, self.rules.similarity_threshold);
        let abandoned =
            is_abandoned(&record.last_updated, self.rules.abandoned_after_years, now);
        let revived_risk = is_revived_with(
            &record.last_updated,
            record.downloads,
            &self.rules.revival(),
            now,
        );

        let risk_score = score(typo_suspect, abandoned, revived_risk);
        let risk_level = classify(risk_score);

        debug!(
            name = %record.name,
            ecosystem = %record.ecosystem,
            typo_suspect,
            abandoned,
            revived_risk,
            risk_score,
            "scored package"
        );

        EnrichedPackageRecord {
            package: record.clone(),
            typo_suspect,
            abandoned,
            revived_risk,
            risk_score,
            risk_level,
        }
    }
}

/// Enrich `records` against a single reference list with the default thresholds.
pub fn run<S: AsRef<str>>(
    records: &[PackageRecord],
    references: &[S],
    now: NaiveDateTime,
) -> Vec<EnrichedPackageRecord> {
    let popular = references
        .iter()
        .map(|r| AsRef::<str>::as_ref(r).to_string())
        .collect();
    Pipeline::new(DetectionRules::default(), ReferenceSet::new(popular)).run(records, now)
}

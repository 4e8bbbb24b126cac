use serde::Serialize;

/// One row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub ecosystem: String,
    /// Raw `YYYY-MM-DD` string; may be empty or malformed.
    pub last_updated: String,
    pub downloads: u64,
    /// Every cell of the source row, in header order.
    #[serde(skip)]
    pub row: Vec<String>,
}

/// A [`PackageRecord`] plus the detector outputs and the resulting risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPackageRecord {
    #[serde(flatten)]
    pub package: PackageRecord,
    pub typo_suspect: bool,
    pub abandoned: bool,
    pub revived_risk: bool,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

/// Input header plus records, in file order.
#[derive(Debug, Clone, Default)]
pub struct PackageTable {
    pub headers: Vec<String>,
    pub records: Vec<PackageRecord>,
}

#[derive(Debug, Clone)]
pub struct EnrichedTable {
    pub headers: Vec<String>,
    pub records: Vec<EnrichedPackageRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All levels, lowest first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::ALL.iter().max(), Some(&RiskLevel::High));
    }

    #[test]
    fn test_enriched_json_is_flat() {
        let enriched = EnrichedPackageRecord {
            package: PackageRecord {
                name: "requsts".to_string(),
                ecosystem: "PyPI".to_string(),
                last_updated: "2020-01-01".to_string(),
                downloads: 50000,
                row: vec!["ignored".to_string()],
            },
            typo_suspect: true,
            abandoned: true,
            revived_risk: true,
            risk_score: 6,
            risk_level: RiskLevel::High,
        };

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["name"], "requsts");
        assert_eq!(json["downloads"], 50000);
        assert_eq!(json["risk_level"], "High");
        assert!(json.get("row").is_none());
    }
}

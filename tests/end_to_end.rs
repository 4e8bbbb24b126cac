use std::path::PathBuf;

use chrono::NaiveDate;
use supply_checkr::config::Config;
use supply_checkr::models::{EnrichedTable, RiskLevel};
use supply_checkr::pipeline::Pipeline;
use supply_checkr::report::{summarize_by_ecosystem, LevelCounts};
use supply_checkr::table::{reader, writer};

fn demo_input() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/packages_metadata.csv")
}

#[test]
fn demo_table_scores_and_round_trips() {
    let now = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let config = Config::default();
    let table = reader::read_packages(&demo_input()).unwrap();

    let pipeline = Pipeline::new(config.detection, config.references);
    let enriched = EnrichedTable {
        records: pipeline.run(&table.records, now),
        headers: table.headers,
    };

    let levels: Vec<(&str, RiskLevel)> = enriched
        .records
        .iter()
        .map(|r| (r.package.name.as_str(), r.risk_level))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("requests", RiskLevel::Low),
            ("requsts", RiskLevel::High),
            ("numpy-utils", RiskLevel::Medium),
            ("flask", RiskLevel::Low),
            ("pandsa", RiskLevel::High),
            ("express", RiskLevel::Low),
            ("expres", RiskLevel::Medium),
            ("left-pad", RiskLevel::High),
            ("reactt", RiskLevel::Medium),
        ]
    );

    let counts = LevelCounts::from_records(&enriched.records);
    assert_eq!(counts.total(), 9);
    assert_eq!(counts.get(RiskLevel::High), 3);

    let by_ecosystem = summarize_by_ecosystem(&enriched.records);
    assert_eq!(by_ecosystem.len(), 2);
    assert_eq!(by_ecosystem[0].ecosystem, "PyPI");
    assert_eq!(by_ecosystem[0].counts.total(), 5);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("enhanced.csv");
    writer::write_enriched(&out, &enriched).unwrap();

    let written = reader::read_packages(&out).unwrap();
    assert_eq!(
        written.headers,
        [
            "name",
            "ecosystem",
            "last_updated",
            "downloads",
            "maintainer",
            "typo_suspect",
            "abandoned",
            "revived_risk",
            "risk_score",
            "risk_level",
        ]
    );
    assert_eq!(written.records.len(), 9);
    assert_eq!(
        written.records[1].row[4..],
        ["unknown", "True", "True", "True", "6", "High"]
    );
    assert_eq!(written.records[8].last_updated, "not-a-date");
}

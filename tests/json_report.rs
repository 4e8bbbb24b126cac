use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn demo_input() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/packages_metadata.csv")
}

fn run_json(dir: &Path, extra: &[&str]) -> Output {
    let config = dir.join("config.toml");
    std::fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_supply-checkr"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .arg(demo_input())
        .args(["--as-of", "2025-01-01", "--report", "json"])
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.join("enhanced.csv"))
        .args(extra)
        .output()
        .unwrap()
}

fn parse_stdout(output: &Output) -> Vec<serde_json::Value> {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{stdout}"))
}

#[test]
fn json_report_is_the_only_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_json(dir.path(), &[]);
    assert!(output.status.success());

    let records = parse_stdout(&output);
    assert_eq!(records.len(), 9);
    assert_eq!(records[1]["name"], "requsts");
    assert_eq!(records[1]["risk_level"], "High");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("results saved to"));
}

#[test]
fn json_report_stays_parseable_with_chart() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("chart.png");
    let output = run_json(dir.path(), &["--chart", chart.to_str().unwrap()]);

    // The JSON is printed before the chart is drawn, so stdout holds only the
    // report even if drawing fails for lack of system fonts.
    let records = parse_stdout(&output);
    assert_eq!(records.len(), 9);

    if output.status.success() {
        assert!(chart.exists());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("chart written to"));
    }
}

#[test]
fn quiet_suppresses_progress_lines() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("chart.png");
    let output = run_json(dir.path(), &["--quiet", "--chart", chart.to_str().unwrap()]);

    assert_eq!(parse_stdout(&output).len(), 9);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("results saved to"));
    assert!(!stderr.contains("chart written to"));
}

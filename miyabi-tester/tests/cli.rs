use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "miyabi-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_miyabi-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("fortune-outage"));
}

#[test]
fn cli_runs_every_scenario_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_miyabi-tester");
    let output_path = temp_path("all");
    let output = Command::new(exe)
        .args(["--scenarios", "all", "--iterations", "2", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = results.as_array().expect("array of results");
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r["passed"] == true));
    assert!(results.iter().all(|r| r["iterations_run"] == 2));
}

#[test]
fn cli_rejects_unknown_report_format() {
    let exe = env!("CARGO_BIN_EXE_miyabi-tester");
    let output = Command::new(exe)
        .args(["--report", "csv"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}

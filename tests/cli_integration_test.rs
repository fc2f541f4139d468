use assert_cmd::Command;
use indoc::indoc;
use std::io::Write;

fn payload_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn render_forecast_as_json() {
    let file = payload_file(indoc! {r#"
        {
            "forecast": [
                {
                    "period_start": "2024-01-01",
                    "pipeline_value": 100000.0,
                    "weighted_value": 60000.0,
                    "best_case": 90000.0,
                    "worst_case": 30000.0,
                    "committed": 20000.0,
                    "deal_count": 8,
                    "historical_win_rate": 0.4
                }
            ]
        }
    "#});

    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["render", "--report", "forecast", "--format", "json"])
        .arg(file.path())
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["report"], "forecast");
    assert_eq!(view["totals"]["pipeline"], 100000.0);
    assert_eq!(view["periods"][0]["formatted_weighted"], "R$ 60.000,00");
}

#[test]
fn render_degrades_on_empty_payload_object() {
    let file = payload_file("{}");

    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["render", "--report", "losses", "--format", "json"])
        .arg(file.path())
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["total_losses"], 0.0);
    assert_eq!(view["by_reason"]["bars"], serde_json::json!([]));
}

#[test]
fn config_chart_floor_reaches_the_rendered_view() {
    let payload = payload_file("{}");
    let config = payload_file(indoc! {r#"
        chart_floor = 2.5
    "#});

    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["render", "--report", "forecast", "--format", "json", "--config"])
        .arg(config.path())
        .arg(payload.path())
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["chart_max"], 2.5);
}

#[test]
fn render_terminal_plain() {
    let file = payload_file(r#"[{ "name": "Alfa", "total_encounters": 10, "wins": 6, "losses": 4 }]"#);

    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["render", "--report", "competitors", "--plain"])
        .arg(file.path())
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Alfa"));
    assert!(stdout.contains("60.0%"));
}

#[test]
fn invalid_json_fails_with_context() {
    let file = payload_file("not json at all");

    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["render", "--report", "forecast"])
        .arg(file.path())
        .assert()
        .failure();

    let stderr = String::from_utf8(output.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("not valid JSON"));
}

#[test]
fn tables_lists_builtin_scales() {
    let output = Command::cargo_bin("salesview")
        .unwrap()
        .args(["tables", "--plain"])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    for expected in ["cohort_heat", "win_rate", "nps_score", "lead_grade"] {
        assert!(stdout.contains(expected), "missing table {expected}");
    }
}

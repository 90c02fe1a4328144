//! CLI command integration tests.
//! Each test works inside its own temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ds_cmd(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ds").unwrap();
    cmd.current_dir(dir.path());
    cmd.env_remove("DS_CONFIG");
    cmd
}

const RECORDING: &str = "\
geschwindigkeit;tonlage;schallstaerke
105;210;45
112;230;52
118;280;55
108;250;47
99;190;40
95;170;38
88;160;35
84;150;31
80;145;27
78;138;25
76;132;24
";

const M1: &str = r#"{"domain": ["Anna", "Bob", "Clara"], "masses": [{"entry": ["Anna", "Clara"], "mass": 0.8}]}"#;
const M2: &str = r#"{"domain": ["Clara", "Bob", "Anna"], "masses": [{"entry": ["Clara"], "mass": 0.6}]}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn analyze_writes_csv_results() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "seq.csv", RECORDING);

    ds_cmd(&dir)
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 windows"));

    let results = std::fs::read_to_string(dir.path().join("results").join("seq.csv")).unwrap();
    assert!(results.starts_with("source,window,metric,emotion,value"));
    // 2 windows × 6 emotions × 3 metrics + header
    assert_eq!(results.lines().count(), 2 * 18 + 1);
}

#[test]
fn analyze_json_with_config() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "seq.csv", RECORDING);
    let config = write(&dir, "analysis.toml", "window_size = 5\n");
    let out = dir.path().join("out");

    ds_cmd(&dir)
        .arg("analyze")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(&out)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 windows"));

    let json = std::fs::read_to_string(out.join("seq.json")).unwrap();
    assert!(json.contains("\"source\": \"seq.csv\""));
}

#[test]
fn analyze_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.csv", "geschwindigkeit;tonlage\n1;2\n");

    ds_cmd(&dir)
        .arg("analyze")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("intensity"));
}

#[test]
fn combine_prints_json() {
    let dir = TempDir::new().unwrap();
    let m1 = write(&dir, "m1.json", M1);
    let m2 = write(&dir, "m2.json", M2);

    ds_cmd(&dir)
        .arg("combine")
        .arg(&m1)
        .arg(&m2)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"domain\""))
        .stdout(predicate::str::contains("0.32"));
}

#[test]
fn combine_then_measures() {
    let dir = TempDir::new().unwrap();
    let m1 = write(&dir, "m1.json", M1);
    let m2 = write(&dir, "m2.json", M2);
    let out = dir.path().join("m12.json");

    ds_cmd(&dir)
        .arg("combine")
        .arg(&m1)
        .arg(&m2)
        .arg("--tree")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("combined 2 sources"));

    ds_cmd(&dir)
        .arg("measures")
        .arg(&out)
        .args(["--target", "Anna,Clara", "--target", "Bob", "--target", "Omega"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.920000"))
        .stdout(predicate::str::contains("0.080000"))
        .stdout(predicate::str::contains("1.000000"));
}

#[test]
fn measures_defaults_to_singletons() {
    let dir = TempDir::new().unwrap();
    let m1 = write(&dir, "m1.json", M1);

    let output = ds_cmd(&dir).arg("measures").arg(&m1).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // header + one row per symbol
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.lines().any(|l| l.starts_with("Bob")));
}

#[test]
fn combine_rejects_mismatched_domains() {
    let dir = TempDir::new().unwrap();
    let m1 = write(&dir, "m1.json", M1);
    let other = write(&dir, "other.json", r#"{"domain": ["x", "y"]}"#);

    ds_cmd(&dir)
        .arg("combine")
        .arg(&m1)
        .arg(&other)
        .assert()
        .failure()
        .stderr(predicate::str::contains("different domains"));
}

#[test]
fn measures_rejects_unknown_target() {
    let dir = TempDir::new().unwrap();
    let m1 = write(&dir, "m1.json", M1);

    ds_cmd(&dir)
        .arg("measures")
        .arg(&m1)
        .args(["--target", "Zed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zed"));
}

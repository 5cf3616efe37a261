//! End-to-end tests of the salutis binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn salutis(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("salutis").unwrap();
    cmd.env("SALUTIS_HOME", home.path())
        .env("USER", "tester")
        .env_remove("SALUTIS_LOG");
    cmd
}

fn write_fast_config(home: &TempDir) {
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  color: never\nbreathing:\n  tick_millis: 1\n",
    )
    .unwrap();
}

#[test]
fn breathe_list_shows_builtin_patterns() {
    let home = TempDir::new().unwrap();
    salutis(&home)
        .args(["breathe", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4-7-8 Relaxation"))
        .stdout(predicate::str::contains("Energizing Breath"));
}

#[test]
fn breathe_list_json() {
    let home = TempDir::new().unwrap();
    let output = salutis(&home)
        .args(["--output", "json", "breathe", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 4);
}

#[test]
fn breathe_run_completes_cycles() {
    let home = TempDir::new().unwrap();
    write_fast_config(&home);

    salutis(&home)
        .args(["breathe", "run", "-p", "box", "-c", "2"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Breathe In"))
        .stdout(predicate::str::contains("Completed 2 cycles of Box Breathing"));
}

#[test]
fn breathe_run_json_is_one_object_per_line() {
    let home = TempDir::new().unwrap();
    write_fast_config(&home);

    let output = salutis(&home)
        .args(["-o", "json", "breathe", "run", "-p", "box", "-c", "1"])
        .timeout(std::time::Duration::from_secs(30))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["phase"], "inhale");
    assert_eq!(lines[4]["cycles"], 1);
    assert_eq!(lines[4]["pattern"], "Box Breathing");
}

#[test]
fn breathe_run_rejects_zero_tick_period() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "breathing:\n  tick_millis: 0\n",
    )
    .unwrap();

    salutis(&home)
        .args(["breathe", "run", "-p", "box", "-c", "1"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_millis"));
}

#[test]
fn breathe_run_unknown_pattern_fails() {
    let home = TempDir::new().unwrap();
    salutis(&home)
        .args(["breathe", "run", "-p", "yoga"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn course_start_and_complete() {
    let home = TempDir::new().unwrap();
    write_fast_config(&home);

    salutis(&home)
        .args(["course", "start", "depression"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started Depression Course"));

    salutis(&home)
        .args(["course", "start", "depression"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already enrolled in this course"));

    for module in ["1", "2", "3"] {
        salutis(&home)
            .args(["course", "complete", "depression", module])
            .assert()
            .success();
    }

    let output = salutis(&home)
        .args(["-o", "json", "course", "show", "depression"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["progress"], 100);
    assert_eq!(value["enrollment"]["isCompleted"], true);
}

#[test]
fn course_progress_is_per_user() {
    let home = TempDir::new().unwrap();
    salutis(&home).args(["course", "start", "1"]).assert().success();

    let output = salutis(&home)
        .env("USER", "someone-else")
        .args(["-o", "json", "course", "list"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 6);
    assert!(value["items"][0]["enrollment"].is_null());
}

#[test]
fn config_init_writes_file() {
    let home = TempDir::new().unwrap();
    salutis(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.yaml").exists());

    salutis(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn completions_bash() {
    let home = TempDir::new().unwrap();
    salutis(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("salutis"));
}

#[test]
fn chat_without_service_falls_back() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "chat:\n  endpoint: http://127.0.0.1:9/chat/completions\n  timeout_secs: 5\n",
    )
    .unwrap();

    salutis(&home)
        .args(["-o", "json", "chat", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("having trouble connecting"));
}

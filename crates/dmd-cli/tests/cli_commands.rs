//! Integration tests for the dmd CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small power catalog.
fn test_catalog() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("powers.json"),
        r#"[
    {
        "name": "Marksman",
        "levels": [
            {"level": 1, "description": "Gain 1 green die when attacking at range.",
             "statistics": {"green_dice_added": 1, "is_conditional": true,
                            "conditions": ["ranged attack"]}},
            {"level": 2, "statistics": {"green_dice_added": 2}}
        ]
    },
    {
        "name": "Toughness",
        "levels": [
            {"level": 1, "statistics": {"wounds_healed": 1, "stress_healed": 1}}
        ]
    },
    {
        "name": "Gambler",
        "levels": [
            {"level": 1, "statistics": {"rerolls_added": 1}}
        ]
    }
]"#,
    )
    .unwrap();
    dir
}

fn catalog_path(dir: &TempDir) -> String {
    dir.path().join("powers.json").to_str().unwrap().to_string()
}

fn dmd() -> Command {
    Command::cargo_bin("dmd").unwrap()
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// dice
// ---------------------------------------------------------------------------

#[test]
fn dice_prints_tables() {
    dmd()
        .args(["dice", "--black", "3", "--green", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("black")
                .and(predicate::str::contains("green"))
                .and(predicate::str::contains("2.50")),
        );
}

#[test]
fn dice_json() {
    let value = json_stdout(dmd().args(["dice", "--black", "3", "--green", "2", "--json"]));
    assert_eq!(value["roll"]["black_dice"], 3);
    assert_eq!(value["roll"]["green_dice"], 2);
    assert_eq!(value["green"]["tentacle_prob"], 0.0);
    assert_eq!(value["black"]["kind"], "standard");
}

#[test]
fn dice_rejects_negative_count() {
    dmd().args(["dice", "--black", "-1"]).assert().failure();
}

// ---------------------------------------------------------------------------
// impact
// ---------------------------------------------------------------------------

#[test]
fn impact_reports_improvement() {
    dmd()
        .args(["impact", "--black", "3", "--add", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("+1.00 successes")
                .and(predicate::str::contains("Significant improvement")),
        );
}

#[test]
fn impact_json() {
    let value = json_stdout(dmd().args(["impact", "--black", "3", "--add", "2", "--json"]));
    assert_eq!(value["expected_successes_increase"], 1.0);
    assert_eq!(value["max_successes_increase"], 2);
    assert_eq!(value["is_significant_improvement"], true);
}

#[test]
fn impact_requires_add() {
    dmd().args(["impact", "--black", "3"]).assert().failure();
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_builds_character() {
    let dir = test_catalog();
    dmd()
        .args([
            "analyze",
            "--catalog",
            &catalog_path(&dir),
            "--name",
            "Lord Adam",
            "--special",
            "Gambler:1",
            "--common",
            "Marksman:2",
            "--common",
            "Toughness:1",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Lord Adam")
                .and(predicate::str::contains("Marksman (level 2)"))
                .and(predicate::str::contains("Playstyle:"))
                .and(predicate::str::contains("Wound healing")),
        );
}

#[test]
fn analyze_json_statistics() {
    let dir = test_catalog();
    let value = json_stdout(dmd().args([
        "analyze",
        "--catalog",
        &catalog_path(&dir),
        "--name",
        "Test",
        "--common",
        "Marksman:2",
        "--json",
    ]));
    let stats = &value["statistics"];
    assert_eq!(stats["total_black_dice"], 3);
    assert_eq!(stats["total_green_dice"], 2);
    assert_eq!(stats["base_expected_successes"], 2.5);
    assert_eq!(value["strategy"]["playstyle"], "balanced");
    assert!(value["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn analyze_insanity_bonus_dice() {
    let dir = test_catalog();
    let value = json_stdout(dmd().args([
        "analyze",
        "--catalog",
        &catalog_path(&dir),
        "--name",
        "Test",
        "--insanity",
        "16",
        "--json",
    ]));
    assert_eq!(value["insanity"], 16);
    assert_eq!(value["statistics"]["bonus_dice_from_insanity"], 2);
    assert_eq!(value["statistics"]["total_green_dice"], 2);
}

#[test]
fn analyze_warns_on_missing_power() {
    let dir = test_catalog();
    dmd()
        .args([
            "analyze",
            "--catalog",
            &catalog_path(&dir),
            "--name",
            "Test",
            "--common",
            "Brawling:1",
            "--common",
            "Marksman:3",
        ])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("unknown power: Brawling")
                .and(predicate::str::contains("has no level 3")),
        );
}

#[test]
fn analyze_rejects_three_commons() {
    let dir = test_catalog();
    dmd()
        .args([
            "analyze",
            "--catalog",
            &catalog_path(&dir),
            "--name",
            "Test",
            "--common",
            "Marksman:1",
            "--common",
            "Toughness:1",
            "--common",
            "Gambler:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most two"));
}

#[test]
fn analyze_missing_catalog_fails() {
    dmd()
        .args(["analyze", "--catalog", "/nonexistent/powers.json", "--name", "Test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn analyze_invalid_catalog_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("powers.json");
    fs::write(&path, "{ not json").unwrap();
    dmd()
        .args(["analyze", "--catalog", path.to_str().unwrap(), "--name", "Test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid power catalog"));
}

#[test]
fn analyze_with_config() {
    let dir = test_catalog();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"base_black_dice": 4, "max_health": 6}"#).unwrap();
    let value = json_stdout(dmd().args([
        "analyze",
        "--catalog",
        &catalog_path(&dir),
        "--name",
        "Test",
        "--config",
        config.to_str().unwrap(),
        "--damage",
        "2",
        "--json",
    ]));
    assert_eq!(value["statistics"]["total_black_dice"], 4);
    assert_eq!(value["health"], 4);
}

#[test]
fn analyze_invalid_config_fails() {
    let dir = test_catalog();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"insanity": {"checkpoints": [9, 5]}}"#).unwrap();
    dmd()
        .args([
            "analyze",
            "--catalog",
            &catalog_path(&dir),
            "--name",
            "Test",
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// ---------------------------------------------------------------------------
// insanity
// ---------------------------------------------------------------------------

#[test]
fn insanity_stops_at_checkpoint() {
    dmd()
        .args(["insanity", "--start", "4", "--tentacles", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("#1").and(predicate::str::contains("End: Insanity: 5/21")),
        );
}

#[test]
fn insanity_without_stop() {
    dmd()
        .args(["insanity", "--start", "4", "--no-stop", "--tentacles", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("End: Insanity: 7/21"));
}

#[test]
fn insanity_multiple_batches_to_death() {
    dmd()
        .args(["insanity", "--start", "18", "--no-stop", "--tentacles", "2", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("End: Insanity: 21/21")
                .and(predicate::str::contains("dead")),
        );
}

#[test]
fn insanity_requires_tentacles() {
    dmd().args(["insanity"]).assert().failure();
}

#[test]
fn verbose_logs_checkpoint_stop() {
    dmd()
        .env_remove("RUST_LOG")
        .args(["--verbose", "insanity", "--start", "4", "--tentacles", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("tentacles stopped at checkpoint"));
}

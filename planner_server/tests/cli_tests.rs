//! Integration tests for the workout-planner binary.
//!
//! These tests cover the commands that terminate on their own:
//! - Help output
//! - Catalog checking against valid, invalid and missing files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "Name of Exercise,Sets,Reps,Benefit,Target Muscle Group,Equipment Needed,Difficulty Level,Workout_Type";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("workout-planner"))
}

/// Helper to write a catalog file with the given data rows
fn write_catalog(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("Data.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(&path, contents).expect("Failed to write catalog");
    path
}

/// Helper to write an empty config so the user's config is never read
fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").expect("Failed to write config");
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personalized workout plan service"));
}

#[test]
fn test_check_catalog_valid() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir);
    let catalog = write_catalog(
        &temp_dir,
        &[
            "Push-ups,3,12,Upper body strength,Chest,None,Beginner,Strength",
            "Deadlift,4,6,Posterior chain,Hamstrings,Barbell,Advanced,Strength",
            "Jump Rope,3,60,Conditioning,Calves,Rope,Beginner,Cardio",
        ],
    );

    cli()
        .arg("check-catalog")
        .arg("--config")
        .arg(&config)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 exercises"))
        .stdout(predicate::str::contains("Strength"))
        .stdout(predicate::str::contains("Catalog is valid"));
}

#[test]
fn test_check_catalog_reports_problems() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir);
    let catalog = write_catalog(
        &temp_dir,
        &[
            "Push-ups,3,12,Upper body strength,Chest,None,Beginner,Strength",
            "Push-ups,3,10,Upper body strength,Chest,None,Beginner,Strength",
        ],
    );

    cli()
        .arg("check-catalog")
        .arg("--config")
        .arg(&config)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than once"));
}

#[test]
fn test_check_catalog_missing_file() {
    let temp_dir = setup_test_dir();
    let config = write_config(&temp_dir);

    cli()
        .arg("check-catalog")
        .arg("--config")
        .arg(&config)
        .arg("--catalog")
        .arg(temp_dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

//! CLI integration tests for shared-pack
//!
//! Every test builds a throwaway project with a `.git` marker directory and,
//! where needed, a shared package under `vendor/andyyou/do-shared`. Most tests
//! use `--file`; the discovery test runs a real `git init` and returns early
//! when no git binary is installed.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const PACKAGE_DIR: &str = "vendor/andyyou/do-shared";

fn shared_pack_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shared-pack"));
    cmd.env_remove("SHARED_PACKAGE_PATH")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_file(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "<?php\n").unwrap();
}

/// Project with `.git` and an installed shared package
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let package = dir.path().join(PACKAGE_DIR);
    fs::create_dir_all(&package).unwrap();
    fs::write(package.join("composer.json"), "{}").unwrap();
    dir
}

// =============================================================================
// Preconditions
// =============================================================================

#[test]
fn test_not_a_repository() {
    let dir = TempDir::new().unwrap();

    shared_pack_cmd()
        .current_dir(dir.path())
        .arg("pack")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a Git repository"));
}

#[test]
fn test_destination_not_found() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Shared package path not found"));
}

#[test]
fn test_env_override_locates_destination() {
    let dir = setup_project();
    fs::remove_dir_all(dir.path().join("vendor")).unwrap();
    let custom = TempDir::new().unwrap();
    fs::write(custom.path().join("composer.json"), "{}").unwrap();
    write_file(dir.path(), "app/Models/Player.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .env("SHARED_PACKAGE_PATH", custom.path())
        .args(["pack", "--file=app/Models/Player.php", "--yes"])
        .assert()
        .success();

    assert!(custom.path().join("app/Models/Player.php").is_file());
}

#[test]
fn test_explicit_file_not_found() {
    let dir = setup_project();

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Jobs/SendReport.php"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Found files").not())
        .stderr(predicate::str::contains("File not found: app/Jobs/SendReport.php"));
}

#[test]
fn test_explicit_file_outside_project() {
    let dir = setup_project();

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=../secret.php"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("relative to the project root"));
}

// =============================================================================
// Pack
// =============================================================================

#[test]
fn test_dry_run_lists_plan_and_moves_nothing() {
    let dir = setup_project();
    write_file(dir.path(), "app/Models/Player.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Models/Player.php", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model (1 file):"))
        .stdout(predicate::str::contains(
            "app/Models/Player.php → vendor/andyyou/do-shared/app/Models/Player.php",
        ))
        .stdout(predicate::str::contains("Dry run completed"))
        .stdout(predicate::str::contains("Do you want to pack").not());

    assert!(dir.path().join("app/Models/Player.php").is_file());
    assert!(!dir.path().join(PACKAGE_DIR).join("app").exists());
}

#[test]
fn test_pack_moves_file() {
    let dir = setup_project();
    write_file(dir.path(), "app/Models/Player.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Models/Player.php", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[MOVED] app/Models/Player.php"))
        .stdout(predicate::str::contains("1 moved, 0 skipped, 0 failed"));

    assert!(!dir.path().join("app/Models/Player.php").exists());
    assert!(dir
        .path()
        .join(PACKAGE_DIR)
        .join("app/Models/Player.php")
        .is_file());
}

#[test]
fn test_pack_confirms_from_stdin() {
    let dir = setup_project();
    write_file(dir.path(), "app/Jobs/SendReport.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file", "app/Jobs/SendReport.php"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 moved"));

    assert!(dir
        .path()
        .join(PACKAGE_DIR)
        .join("app/Jobs/SendReport.php")
        .is_file());
}

#[test]
fn test_pack_declined_is_cancelled() {
    let dir = setup_project();
    write_file(dir.path(), "app/Jobs/SendReport.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Jobs/SendReport.php"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    assert!(dir.path().join("app/Jobs/SendReport.php").is_file());
}

#[test]
fn test_pack_skips_existing_target() {
    let dir = setup_project();
    write_file(dir.path(), "app/Models/Player.php");
    write_file(&dir.path().join(PACKAGE_DIR), "app/Models/Player.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Models/Player.php", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings:"))
        .stdout(predicate::str::contains(
            "app/Models/Player.php: target already exists (will be skipped)",
        ))
        .stdout(predicate::str::contains("0 moved, 1 skipped, 0 failed"));

    assert!(dir.path().join("app/Models/Player.php").is_file());
}

fn git_init(dir: &Path) -> bool {
    fs::remove_dir(dir.join(".git")).unwrap();
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["init", "-q"])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[test]
fn test_pack_discovers_untracked_files_from_git() {
    let dir = setup_project();
    if !git_init(dir.path()) {
        return;
    }
    write_file(dir.path(), "app/Models/Player.php");
    write_file(dir.path(), "database/seeders/PlayerSeeder.php");
    write_file(dir.path(), "app/Models/notes.txt");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model (1 file):"))
        .stdout(predicate::str::contains("Seeder (1 file):"))
        .stdout(predicate::str::contains("2 moved, 0 skipped, 0 failed"));

    let package = dir.path().join(PACKAGE_DIR);
    assert!(package.join("app/Models/Player.php").is_file());
    assert!(package.join("database/seeders/PlayerSeeder.php").is_file());
    assert!(dir.path().join("app/Models/notes.txt").is_file());
}

#[test]
fn test_project_flag() {
    let dir = setup_project();
    write_file(dir.path(), "app/Services/Billing.php");
    let elsewhere = TempDir::new().unwrap();

    shared_pack_cmd()
        .current_dir(elsewhere.path())
        .arg("--project")
        .arg(dir.path())
        .args(["pack", "--file=app/Services/Billing.php", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service (1 file):"));
}

// =============================================================================
// Categories & config
// =============================================================================

#[test]
fn test_categories_lists_registry() {
    let dir = TempDir::new().unwrap();

    shared_pack_cmd()
        .current_dir(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Models"))
        .stdout(predicate::str::contains("make:model"))
        .stdout(predicate::str::contains("database/seeders"));
}

#[test]
fn test_config_init_and_custom_category() {
    let dir = setup_project();

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join(".shared-pack.toml").is_file());

    fs::write(
        dir.path().join(".shared-pack.toml"),
        "[[category]]\nname = \"policy\"\nprefixes = [\"app/Policies\"]\n",
    )
    .unwrap();
    write_file(dir.path(), "app/Policies/PostPolicy.php");

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--file=app/Policies/PostPolicy.php", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Policy (1 file):"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = setup_project();
    fs::write(dir.path().join(".shared-pack.toml"), "[discovery\n").unwrap();

    shared_pack_cmd()
        .current_dir(dir.path())
        .args(["pack", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

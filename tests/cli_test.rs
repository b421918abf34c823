// file: tests/cli_test.rs
// version: 1.0.0
// guid: 5e7a9c1b-3d2f-4a6e-8b0c-9d1e2f3a4b5c

//! Tests for the gmxsh binary

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// gmxsh isolated from user and project config, with the stand-in tools
fn gmxsh(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gmxsh").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("GMXBIN", common::tool_dir())
        .env_remove("GMXSHELL_CONFIG")
        .env_remove("GMXSHELL_FAILURE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_passes_flags() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["run", "g_fake", "--capture", "v", "s=topol.tpr", "f=a.xtc", "f=b.xtc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ARG:-v\nARG:-s\nARG:topol.tpr\nARG:-f\nARG:a.xtc\nARG:b.xtc\n",
        ));
}

#[test]
fn test_run_failure_raise_exits_nonzero() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["run", "g_fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error code 1"));
}

#[test]
fn test_run_failure_ignore_propagates_status() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["run", "g_fail", "--failure", "ignore", "--capture"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("out line"))
        .stdout(predicate::str::contains("err line"));
}

#[test]
fn test_run_missing_tool_mentions_gmxrc() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["run", "g_not_installed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("g_not_installed"))
        .stderr(predicate::str::contains("GMXRC"));
}

#[test]
fn test_run_with_input_lines() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["run", "g_cat", "--capture", "-i", "Protein", "-i", "System"])
        .assert()
        .success()
        .stdout("Protein\nSystem\n");
}

#[test]
fn test_doc_prints_description() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["doc", "g_fake"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command: g_fake"))
        .stdout(predicate::str::contains("g_fake pretends to analyse a trajectory."));
}

#[test]
fn test_list_json_reports_catalog() {
    let home = TempDir::new().unwrap();
    let output = gmxsh(&home)
        .args(["list", "--json", "--no-docs"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let available: Vec<&str> = report["available"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(available, vec!["grompp", "make_ndx", "trjconv"]);

    let missing = report["missing"].as_array().unwrap();
    assert!(missing.iter().any(|v| v == "mdrun"));
    assert!(!missing.iter().any(|v| v == "grompp"));
}

#[test]
fn test_qtot() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["qtot", "f=md.mdp"])
        .assert()
        .success()
        .stdout("-2\n");
}

#[test]
fn test_groups_json() {
    let home = TempDir::new().unwrap();
    gmxsh(&home)
        .args(["groups", "--json", "f=conf.gro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Protein\""));
}

#[test]
fn test_project_config_defaults_apply() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".gromacs-shell.toml"),
        "[tools.g_fake]\ndefaults = { maxwarn = 2 }\n",
    )
    .unwrap();
    gmxsh(&home)
        .args(["run", "g_fake", "--capture", "o=x.tpr"])
        .assert()
        .success()
        .stdout("ARG:-maxwarn\nARG:2\nARG:-o\nARG:x.tpr\n");
}

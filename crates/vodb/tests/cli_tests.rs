// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tracing::info;

const OLD: &str = r#"[{"id":"v1","name":"x","value":"1"}]"#;
const NEW: &str = r#"[
    {"id":"v1","name":"x","value":"2"},
    {"id":"v2","name":"y","incomingRelations":[{"parentId":"v1","relationName":"next"}]}
]"#;

/// Write `content` to `name` inside `dir`
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A `vodb` command with an isolated configuration file
fn vodb(dir: &TempDir) -> Command {
    let config = write_file(dir, "vodb.toml", "");
    let mut cmd = Command::cargo_bin("vodb").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_command() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let mut cmd = Command::cargo_bin("vodb").unwrap();
    cmd.arg("--help").assert().success().stdout(predicate::str::contains("Visual Object Debugger"));
}

#[test]
fn test_version_command() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("vodb").unwrap();
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("vodb"));
}

#[test]
fn test_missing_subcommand() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("vodb").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_diff_prints_changelog_entry() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let old = write_file(&dir, "old.json", OLD);
    let new = write_file(&dir, "new.json", NEW);

    vodb(&dir)
        .arg("diff")
        .arg(old)
        .arg(new)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nodeChanges\""))
        .stdout(predicate::str::contains("\"action\": \"update\""))
        .stdout(predicate::str::contains("\"relationName\": \"next\""));
}

#[test]
fn test_diff_rejects_duplicate_ids() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let old = write_file(&dir, "old.json", r#"[{"id":"v1"},{"id":"v1"}]"#);
    let new = write_file(&dir, "new.json", OLD);

    vodb(&dir)
        .arg("diff")
        .arg(old)
        .arg(new)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate variable id"));
}

#[test]
fn test_export_dot_and_plantuml() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(&dir, "snapshot.json", NEW);

    vodb(&dir)
        .arg("export")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph variables {"));

    vodb(&dir)
        .arg("export")
        .arg(&snapshot)
        .args(["--format", "plantuml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@startuml"))
        .stdout(predicate::str::contains(": next"));
}

#[test]
fn test_replay_script_with_summary() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let script = format!(
        "{{\"command\":\"snapshot\",\"variables\":{OLD}}}\n{{\"command\":\"snapshot\",\"variables\":{}}}\n{{\"command\":\"stepBack\"}}\n{{\"command\":\"stepBack\"}}\n",
        NEW.replace('\n', "")
    );
    let script = write_file(&dir, "script.jsonl", &script);

    vodb(&dir)
        .arg("replay")
        .arg(script)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\":\"initialize\""))
        .stdout(predicate::str::contains("\"command\":\"noop\""))
        .stderr(predicate::str::contains("nodes: 1, edges: 0, history: 1"));
}

#[test]
fn test_zero_max_history_is_rejected() {
    vodb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(&dir, "snapshot.json", OLD);

    vodb(&dir).args(["--max-history", "0"]).arg("export").arg(snapshot).assert().failure();
}

//! Integration tests for the topomap CLI
//!
//! These tests run the topomap binary against session logs and snapshots
//! written to temporary directories.

mod common;

use common::{diamond_snapshot, stdout_json, topomap, write_session, DIAMOND_SESSION};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: topomap"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("reachable"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("topomap"));
}

#[test]
fn test_no_subcommand_prints_banner() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("topomap --help"));
}

#[test]
fn test_subcommand_help() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .args(["path", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cheapest path"));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_missing_required_argument_exit_code_2() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .assert()
        .code(2);
}

#[test]
fn test_unknown_format_exit_code_2() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .args(["--format", "yaml", "stats", "map.json"])
        .assert()
        .code(2);
}

#[test]
fn test_out_of_range_chance_json_usage_error() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .args(["--format", "json", "prune"])
        .arg(&snapshot)
        .args(["--vertex-chance", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_invalid_index_exit_code_3() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--to", "9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid landmark index 9"));
}

#[test]
fn test_invalid_index_json_envelope() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .args(["--format", "json", "reachable"])
        .arg(&snapshot)
        .args(["--from", "12"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"invalid_index\""))
        .stderr(predicate::str::contains("\"code\":3"));
}

#[test]
fn test_missing_snapshot_exit_code_1() {
    let dir = tempdir().unwrap();
    topomap(dir.path())
        .arg("stats")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read snapshot"));
}

#[test]
fn test_tampered_snapshot_exit_code_3() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);

    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    value["current"] = serde_json::json!(40);
    fs::write(&snapshot, value.to_string()).unwrap();

    topomap(dir.path())
        .arg("stats")
        .arg(&snapshot)
        .assert()
        .code(3);
}

#[test]
fn test_malformed_hash_rejected() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);

    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    value["landmarks"][2]["hash"] = serde_json::json!("a\u{e9}\u{e9}\u{e9}\u{e9}");
    fs::write(&snapshot, value.to_string()).unwrap();

    topomap(dir.path())
        .arg("stats")
        .arg(&snapshot)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid observation hash"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_quiet_suppresses_error_message() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .args(["--quiet", "path"])
        .arg(&snapshot)
        .args(["--to", "9"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn test_replay_summary() {
    let dir = tempdir().unwrap();
    let log = write_session(dir.path(), DIAMOND_SESSION);
    topomap(dir.path())
        .arg("replay")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replayed 10 events: 4 landmarks, 8 edges, current landmark 0",
        ))
        .stdout(predicate::str::contains("Traversals: 3 applied, 0 skipped"));
}

#[test]
fn test_replay_json_output() {
    let dir = tempdir().unwrap();
    let log = write_session(dir.path(), DIAMOND_SESSION);
    let output = topomap(dir.path())
        .args(["--format", "json", "replay"])
        .arg(&log)
        .args(["--only-mode", "exploration"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["landmarks"], 4);
    assert_eq!(json["directed"], false);
    assert_eq!(json["stats"]["traversals_applied"], 1);
    assert_eq!(json["stats"]["traversals_skipped"], 2);
    assert!(json["output"].is_null());
}

#[test]
fn test_replay_malformed_line() {
    let dir = tempdir().unwrap();
    let log = write_session(
        dir.path(),
        "{\"event\":\"reset\",\"shape\":[1],\"data\":[0.0]}\n{\"event\":\"jump\"}\n",
    );
    topomap(dir.path())
        .arg("replay")
        .arg(&log)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_replay_event_before_reset_exit_code_3() {
    let dir = tempdir().unwrap();
    let log = write_session(dir.path(), "{\"event\":\"add_edge\",\"from\":0,\"to\":1}\n");
    topomap(dir.path())
        .arg("replay")
        .arg(&log)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("map has no landmarks"));
}

#[test]
fn test_replay_uses_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("topomap.toml");
    fs::write(&config, "directed = true\n\n[cost]\nincrement = 2.0\n").unwrap();
    let snapshot = diamond_snapshot(dir.path(), &["--config", config.to_str().unwrap()]);

    let output = topomap(dir.path())
        .args(["--format", "json", "stats"])
        .arg(&snapshot)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["directed"], true);
    // 0->1, 0->2, 1->3, 2->3 plus the loop closure 1->0
    assert_eq!(json["edges"], 5);
}

#[test]
fn test_replay_picks_up_global_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "directed = true\n").unwrap();
    let log = write_session(dir.path(), DIAMOND_SESSION);

    topomap(dir.path())
        .args(["--format", "json", "replay"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"directed\": true"));
}

#[test]
fn test_invalid_config_exit_code_2() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[pruning]\nvertex_chance = 3.0\n").unwrap();
    let log = write_session(dir.path(), DIAMOND_SESSION);

    topomap(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pruning.vertex_chance"));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_path_avoids_unreliable_edges() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--from", "0", "--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 -> 1 -> 3"))
        .stdout(predicate::str::contains("2 hops, cost 7.00"));
}

#[test]
fn test_path_with_mode_filter() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &["--only-mode", "exploration"]);
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 -> 2 -> 3"));
}

#[test]
fn test_path_json() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    let output = topomap(dir.path())
        .args(["--format", "json", "path"])
        .arg(&snapshot)
        .args(["--to", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["from"], 0);
    assert_eq!(json["path"], serde_json::json!([0, 1, 3]));
    assert_eq!(json["hops"], 2);
    assert_eq!(json["cost"], 7.0);
}

#[test]
fn test_path_to_self() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--from", "2", "--to", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 hops, cost 0.00"));
}

#[test]
fn test_reachable_directed() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &["--directed"]);
    topomap(dir.path())
        .arg("reachable")
        .arg(&snapshot)
        .args(["--from", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3\n"))
        .stdout(predicate::str::contains("3 landmarks unreachable from 3"));

    topomap(dir.path())
        .arg("reachable")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0 1 2 3\n"));
}

#[test]
fn test_stats_json() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    let output = topomap(dir.path())
        .args(["--format", "json", "stats"])
        .arg(&snapshot)
        .output()
        .unwrap();

    let json = stdout_json(&output);
    assert_eq!(json["directed"], false);
    assert_eq!(json["landmarks"], 4);
    assert_eq!(json["pruned_landmarks"], 0);
    assert_eq!(json["edges"], 8);
    assert_eq!(json["current"], 0);
    assert_eq!(json["current_hash"].as_str().unwrap().len(), 64);
}

// ============================================================================
// Prune and export
// ============================================================================

#[test]
fn test_prune_edges_disconnects_target() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    let pruned = dir.path().join("pruned.json");

    topomap(dir.path())
        .arg("prune")
        .arg(&snapshot)
        .args(["--edge-threshold", "0.2", "--output"])
        .arg(&pruned)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 4 edges and 0 landmarks (4 -> 4 live)"));

    topomap(dir.path())
        .arg("path")
        .arg(&pruned)
        .args(["--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no path from 0 to 3"));

    // Input left untouched when --output is given
    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 -> 1 -> 3"));
}

#[test]
fn test_prune_vertices_dry_run() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);

    topomap(dir.path())
        .arg("prune")
        .arg(&snapshot)
        .args(["--vertex-chance", "1", "--seed", "1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 edges and 3 landmarks (4 -> 1 live)"))
        .stdout(predicate::str::contains("Pruned landmarks: 1 2 3"));

    topomap(dir.path())
        .args(["--format", "json", "stats"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"landmarks\": 4"));
}

#[test]
fn test_prune_in_place_keeps_tombstones() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);

    topomap(dir.path())
        .args(["--quiet", "prune"])
        .arg(&snapshot)
        .args(["--vertex-chance", "1", "--seed", "3"])
        .assert()
        .success();

    let output = topomap(dir.path())
        .args(["--format", "json", "stats"])
        .arg(&snapshot)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["landmarks"], 1);
    assert_eq!(json["pruned_landmarks"], 3);
    assert_eq!(json["edges"], 0);

    topomap(dir.path())
        .arg("path")
        .arg(&snapshot)
        .args(["--to", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("pruned"));
}

#[test]
fn test_export_dot() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .arg("export")
        .arg(&snapshot)
        .arg("--dot")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph topomap {"))
        .stdout(predicate::str::contains("0 -> 1"))
        .stdout(predicate::str::contains("pos=\"1,0!\""));
}

#[test]
fn test_export_json_to_file() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    let out = dir.path().join("graph.json");

    topomap(dir.path())
        .arg("export")
        .arg(&snapshot)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 landmarks and 8 edges"));

    let graph: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(graph["nodes"][0]["current"], true);
    assert_eq!(graph["edges"].as_array().unwrap().len(), 8);
}

#[test]
fn test_export_dot_with_json_format_is_usage_error() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .args(["--format", "json", "export", "--dot"])
        .arg(&snapshot)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_log_flags_accepted() {
    let dir = tempdir().unwrap();
    let snapshot = diamond_snapshot(dir.path(), &[]);
    topomap(dir.path())
        .args(["--log-level", "debug", "--log-json", "stats"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Edges: 8"));
}

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Command for the topomap binary, isolated from any user configuration
pub fn topomap(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("topomap");
    cmd.env("TOPOMAP_CONFIG_DIR", config_dir)
        .env_remove("TOPOMAP_CONFIG")
        .env_remove("TOPOMAP_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Diamond session: 0-1, 0-2, 1-3, 2-3. Edge 0-1 failed once while
/// exploring, edge 2-3 failed twice during locomotion.
pub const DIAMOND_SESSION: &str = r#"{"event":"reset","shape":[2],"data":[0.0,0.0]}
{"event":"add_landmark","shape":[2],"data":[1.0,0.0],"position":{"x":1.0,"y":0.0,"z":0.0}}
{"event":"add_landmark","shape":[2],"data":[0.0,1.0]}
{"event":"set_current","index":1}
{"event":"add_landmark","shape":[2],"data":[1.0,1.0]}
{"event":"add_edge","from":2,"to":3}
{"event":"set_current","index":0}
{"event":"traversal","from":0,"to":1,"success":false,"mode":"exploration"}
{"event":"traversal","from":2,"to":3,"success":false,"mode":"locomotion"}
{"event":"traversal","from":2,"to":3,"success":false,"mode":"locomotion"}
"#;

#[allow(dead_code)]
pub fn write_session(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("session.jsonl");
    fs::write(&path, contents).unwrap();
    path
}

/// Replay the diamond session into `map.json` and return its path
#[allow(dead_code)]
pub fn diamond_snapshot(dir: &Path, extra_args: &[&str]) -> PathBuf {
    let log = write_session(dir, DIAMOND_SESSION);
    let snapshot = dir.join("map.json");
    topomap(dir)
        .arg("replay")
        .arg(&log)
        .arg("--output")
        .arg(&snapshot)
        .args(extra_args)
        .assert()
        .success();
    snapshot
}

#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

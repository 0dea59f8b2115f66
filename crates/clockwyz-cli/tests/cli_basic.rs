//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as the data directory.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_clockwyz-cli"))
        .env("CLOCKWYZ_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_grid_to_pixels() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["grid", "to-pixels", "9:30"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "608");
}

#[test]
fn test_grid_to_time_snaps() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["grid", "to-time", "615"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("09:30"), "got {stdout}");
}

#[test]
fn test_grid_rejects_bad_time() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["grid", "to-pixels", "noon-ish"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, stderr) = run_cli(home.path(), &["grid", "to-pixels", "4294967295 PM"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "grid.snap_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "15");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "grid.snap_minutes", "30"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "grid.snap_minutes"]);
    assert_eq!(stdout.trim(), "30");

    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "grid.nope", "1"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_list() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("grid.snap_minutes = 15"));
}

#[test]
fn test_board_conflicts_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["board", "conflicts", "--week", "2024-03-11", "--json"],
    );
    assert_eq!(code, 0);
    let conflicts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["first_id"], "4");
    assert_eq!(conflicts[0]["second_id"], "5");
    assert_eq!(conflicts[0]["overlap_minutes"], 30);
}

#[test]
fn test_board_replay_drag() {
    let home = tempfile::tempdir().unwrap();
    // Monday column centre is x=124, Wednesday x=364; the body starts at y=48.
    let script = serde_json::json!([
        { "op": "pointer_down", "event_id": "1", "x": 124.0, "y": 624.0 },
        { "op": "pointer_move", "x": 364.0, "y": 1072.0 },
        { "op": "pointer_up", "x": 364.0, "y": 1072.0 },
        { "op": "pointer_down", "event_id": "2", "x": 124.0, "y": 752.0 },
        { "op": "pointer_move", "x": 364.0, "y": 1200.0 },
        { "op": "pointer_up", "x": 364.0, "y": 1200.0 }
    ]);
    let path = home.path().join("script.json");
    std::fs::write(&path, script.to_string()).unwrap();

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["board", "replay", path.to_str().unwrap(), "--week", "2024-03-11", "--json"],
    );
    assert_eq!(code, 0, "{stderr}");
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let events = out["events"].as_array().unwrap();
    let find = |id: &str| events.iter().find(|e| e["id"] == id).unwrap().clone();
    assert_eq!(find("1")["start"], "2024-03-13T16:00:00");
    assert_eq!(find("1")["end"], "2024-03-13T17:30:00");
    assert_eq!(find("2")["start"], "2024-03-11T11:00:00");

    let outcomes = out["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[3], "down 2: ignored");
    assert_eq!(outcomes[5], "up: ignored");
}

#[test]
fn test_board_replay_quick_create() {
    let home = tempfile::tempdir().unwrap();
    let script = serde_json::json!([
        { "op": "cell_click", "x": 604.0, "y": 688.0 },
        { "op": "set_title", "title": "Read chapter 4" },
        { "op": "increase_duration" },
        { "op": "submit" }
    ]);
    let path = home.path().join("script.json");
    std::fs::write(&path, script.to_string()).unwrap();

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["board", "replay", path.to_str().unwrap(), "--week", "2024-03-11", "--json"],
    );
    assert_eq!(code, 0, "{stderr}");
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let events = out["events"].as_array().unwrap();
    assert_eq!(events.len(), 6);
    let created = events.iter().find(|e| e["title"] == "Read chapter 4").unwrap();
    // Friday 10:00, default 15 minutes plus one step.
    assert_eq!(created["start"], "2024-03-15T10:00:00");
    assert_eq!(created["end"], "2024-03-15T10:30:00");
}

#[test]
fn test_habit_add_and_toggle() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["habit", "add", "Drink Water"]);
    assert_eq!(code, 0, "{stderr}");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["habit", "toggle", "drink water", "--date", "2024-03-11"],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("done"));

    let (_, stdout, _) = run_cli(
        home.path(),
        &["habit", "toggle", "Drink Water", "--date", "2024-03-11"],
    );
    assert!(stdout.starts_with("not done"));

    let (code, stdout, _) = run_cli(home.path(), &["habit", "list", "--json"]);
    assert_eq!(code, 0);
    let habits: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(habits.as_array().unwrap().len(), 1);
}

#[test]
fn test_habit_unknown_template() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["habit", "add", "Juggle"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown template"));
}

#[test]
fn test_assistant_tools() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["assistant", "tools"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("optimize"));
}

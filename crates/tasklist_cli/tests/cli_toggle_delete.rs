use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
}

fn write_store(store_dir: &Path, tasks: serde_json::Value) {
    std::fs::create_dir_all(store_dir).unwrap();
    std::fs::write(
        store_dir.join("tasklist_tasks_v1.json"),
        serde_json::to_string(&tasks).unwrap(),
    )
    .unwrap();
}

fn stored(store_dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(store_dir.join("tasklist_tasks_v1.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn run(store_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tasklist"))
        .args(args)
        .env("TASKLIST_STORE_DIR", store_dir)
        .output()
        .expect("failed to run tasklist")
}

fn three_tasks() -> serde_json::Value {
    serde_json::json!([
        { "id": 30, "text": "third", "completed": false },
        { "id": 20, "text": "second", "completed": true },
        { "id": 10, "text": "first", "completed": false }
    ])
}

#[test]
fn toggle_marks_row_completed_and_back() {
    let store_dir = temp_dir("cli-toggle");
    write_store(&store_dir, three_tasks());

    assert!(run(&store_dir, &["toggle", "1"]).status.success());
    let after_first = stored(&store_dir);
    assert!(run(&store_dir, &["toggle", "1"]).status.success());
    let after_second = stored(&store_dir);
    std::fs::remove_dir_all(&store_dir).ok();

    assert_eq!(after_first[0]["completed"], true);
    assert_eq!(after_second[0]["completed"], false);
    assert_eq!(after_second, three_tasks());
}

#[test]
fn toggle_resolves_rows_within_filter() {
    let store_dir = temp_dir("cli-toggle-filter");
    write_store(&store_dir, three_tasks());

    let output = run(&store_dir, &["toggle", "2", "--filter", "active"]);
    let tasks = stored(&store_dir);
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(output.status.success());
    assert_eq!(tasks[2]["id"], 10);
    assert_eq!(tasks[2]["completed"], true);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total: 3 | Active: 1 | Completed: 2"));
}

#[test]
fn delete_removes_row_and_keeps_order() {
    let store_dir = temp_dir("cli-delete");
    write_store(&store_dir, three_tasks());

    let output = run(&store_dir, &["delete", "2"]);
    let tasks = stored(&store_dir);
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(output.status.success());
    let ids: Vec<u64> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![30, 10]);
}

#[test]
fn unknown_row_is_a_noop() {
    let store_dir = temp_dir("cli-delete-missing");
    write_store(&store_dir, three_tasks());

    let output = run(&store_dir, &["delete", "9"]);
    let tasks = stored(&store_dir);
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(tasks, three_tasks());
}

#[test]
fn clear_completed_keeps_incomplete_tasks() {
    let store_dir = temp_dir("cli-clear");
    write_store(
        &store_dir,
        serde_json::json!([
            { "id": 3, "text": "c", "completed": true },
            { "id": 2, "text": "b", "completed": false },
            { "id": 1, "text": "a", "completed": true }
        ]),
    );

    let output = run(&store_dir, &["clear-completed"]);
    let tasks = stored(&store_dir);
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(output.status.success());
    assert_eq!(
        tasks,
        serde_json::json!([{ "id": 2, "text": "b", "completed": false }])
    );
}

#[test]
fn row_argument_must_be_a_number() {
    let store_dir = temp_dir("cli-toggle-bad");
    let output = run(&store_dir, &["toggle", "first"]);
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

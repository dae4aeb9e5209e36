use skyjellies_testkit::read_jsonl;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn scripted_demo_session_writes_event_log() {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let log_path = std::env::temp_dir()
        .join(format!("skyjellies_headless_{timestamp}"))
        .join("events.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_skyjellies"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            "--script",
            "scripts/feeding_demo.json",
            "--seed",
            "3",
            "--event-log",
        ])
        .arg(&log_path)
        .output()
        .expect("spawn skyjellies");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ticks=403"), "stdout: {stdout}");
    assert!(stdout.contains("commands_failed=2"), "stdout: {stdout}");
    assert!(stdout.contains("jelly_saturation=100"), "stdout: {stdout}");

    let events = read_jsonl(&log_path).expect("event log readable");
    let kinds: Vec<&str> = events
        .iter()
        .filter_map(|event| event["kind"].as_str())
        .collect();
    assert_eq!(kinds.iter().filter(|kind| **kind == "Command").count(), 13);
    assert_eq!(kinds.last(), Some(&"Summary"));
    assert!(
        events.iter().any(|event| event["payload"] == "entered watching"),
        "jelly never watched the player"
    );

    let _ = std::fs::remove_dir_all(log_path.parent().unwrap());
}

//! Logging specs
//!
//! Logs never share stdout with wire frames.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn logs_go_to_stderr_by_default() {
    let run = cli().args(&["defer", "jobs.send"]).passes().stderr_has("submitted");
    assert_eq!(run.messages().len(), 1);
}

#[test]
fn log_dir_receives_rolling_file() {
    let dir = tempfile::tempdir().unwrap();

    let run = cli()
        .env("TW_LOG_DIR", dir.path().to_str().unwrap())
        .args(&["defer", "jobs.send"])
        .passes();
    assert_eq!(run.messages().len(), 1);
    assert!(!run.stderr.contains("submitted"));

    let logs: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("tw.log"), "{name}");
    assert!(std::fs::read_to_string(&logs[0]).unwrap().contains("submitted"));
}

#[test]
fn unusable_log_dir_falls_back_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let run = cli()
        .env("TW_LOG_DIR", blocker.join("logs").to_str().unwrap())
        .args(&["defer", "jobs.send"])
        .passes()
        .stderr_has("log directory unusable")
        .stderr_has("submitted");
    assert_eq!(run.messages().len(), 1);
}

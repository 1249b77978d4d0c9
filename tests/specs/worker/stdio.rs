//! `tw worker` specs
//!
//! Jobs arrive on stdin as length-prefixed JSON; every job is answered with
//! exactly one "DONE", and `null` stops the worker.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn done(n: usize) -> Vec<serde_json::Value> {
    vec![json!("DONE"); n]
}

#[test]
fn function_job_emits_one_token() {
    let run = cli()
        .args(&["worker"])
        .stdin_messages(&[
            json!({"path": "tw.builtins", "callable": "echo", "args": [1, 2], "kwargs": {}}),
            json!(null),
        ])
        .passes()
        .stderr_has("echo");

    assert_eq!(run.values(), done(1));
}

#[test]
fn failing_job_still_emits_one_token() {
    let run = cli()
        .args(&["worker"])
        .stdin_messages(&[
            json!({"path": "tw.builtins", "callable": "fail", "args": ["bad input"]}),
            json!(null),
        ])
        .passes()
        .stderr_has("bad input");

    assert_eq!(run.values(), done(1));
}

#[test]
fn method_job_constructs_instance() {
    let run = cli()
        .env("TW_LOG", "debug")
        .args(&["worker"])
        .stdin_messages(&[
            json!({"path": "tw.builtins:Counter", "callable": "incr", "class_args": [41], "args": []}),
            json!(null),
        ])
        .passes()
        .stderr_has("tw.builtins:Counter");

    assert_eq!(run.values(), done(1));
}

#[test]
fn sentinel_alone_emits_nothing() {
    cli().args(&["worker"]).stdin_messages(&[json!(null)]).passes().stdout_empty();
}

#[test]
fn bad_jobs_do_not_stop_the_worker() {
    let run = cli()
        .args(&["worker"])
        .stdin_messages(&[
            json!({"path": "no.such.module", "callable": "f"}),
            json!({"path": "tw.builtins:Nope", "callable": "f"}),
            json!({"path": "", "callable": "f"}),
            json!([1, 2, 3]),
            json!({"path": "tw.builtins", "callable": "echo"}),
            json!(null),
        ])
        .passes()
        .stderr_has("no.such.module");

    assert_eq!(run.values(), done(5));
}

#[test]
fn jobs_after_sentinel_are_ignored() {
    let run = cli()
        .args(&["worker"])
        .stdin_messages(&[json!(null), json!({"path": "tw.builtins", "callable": "echo"})])
        .passes();

    assert!(run.values().is_empty());
}

#[test]
fn closed_stdin_without_sentinel_exits_cleanly() {
    let run = cli()
        .args(&["worker"])
        .stdin_messages(&[json!({"path": "tw.builtins", "callable": "echo"})])
        .passes()
        .stderr_has("stdin closed");

    assert_eq!(run.values(), done(1));
}

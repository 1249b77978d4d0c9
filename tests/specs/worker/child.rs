//! ChildWorker specs
//!
//! Drive `tw worker` as a separate OS process.

use crate::prelude::*;
use similar_asserts::assert_eq;
use tw_worker::{ChildWorker, Completion};

fn spawn_worker() -> ChildWorker {
    let path = assert_cmd::cargo::cargo_bin("tw");
    let mut command = tokio::process::Command::new(path);
    command.arg("worker").env("TW_LOG", "warn").stderr(std::process::Stdio::null());
    ChildWorker::spawn(command).unwrap()
}

#[tokio::test]
async fn child_answers_each_job() {
    let mut worker = spawn_worker();
    assert!(worker.id().is_some());

    let echo = JobDescriptor::new("tw.builtins", "echo").args(vec![json!("hi")]);
    let counter = JobDescriptor::new("tw.builtins:Counter", "incr").class_args(vec![json!(1)]);
    let failing = JobDescriptor::new("tw.builtins", "fail");
    let missing = JobDescriptor::new("nowhere", "f");

    for job in [&echo, &counter, &failing, &missing, &echo] {
        assert_eq!(worker.run(job).await.unwrap(), Completion::Done);
    }

    let status = worker.shutdown().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn child_shutdown_without_jobs() {
    let worker = spawn_worker();
    let status = worker.shutdown().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn pipelined_jobs_are_answered_in_order() {
    let mut worker = spawn_worker();
    let job = JobDescriptor::new("tw.builtins", "sleep").args(vec![json!(0.01)]);

    for _ in 0..3 {
        worker.submit(&job).await.unwrap();
    }
    for _ in 0..3 {
        assert_eq!(worker.wait_done().await.unwrap(), Completion::Done);
    }

    assert!(worker.shutdown().await.unwrap().success());
}

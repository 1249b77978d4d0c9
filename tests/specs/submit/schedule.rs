//! `tw schedule` / `tw unschedule` specs
//!
//! Schedules validate their timing selector before anything is written.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn interval_schedule_writes_five_frames() {
    let run = cli()
        .args(&["schedule", "jobs.tick", "--interval", "60", "--class-arg", "\"owner-1\""])
        .passes();

    let message = run.message();
    assert_eq!(message.command, WireCommand::Schedule);
    assert_eq!(message.frames.len(), 5);
    assert_eq!(message.frames[0], "default");
    assert_eq!(message.frames[1], "guarantee");
    assert_eq!(message.frames[2], "60");
    assert_eq!(message.frames[4], "");

    let job = decode_run(&message.frames[3]).unwrap();
    assert_eq!(job.path, "jobs");
    assert_eq!(job.callable, "tick");
    assert_eq!(job.class_args, vec![json!("owner-1")]);
}

#[test]
fn cron_schedule_has_no_interval() {
    let run = cli().args(&["schedule", "jobs.tick", "--cron", "*/5 * * * *"]).passes();

    let envelope = ScheduleEnvelope::from_frames(WireCommand::Schedule, &run.message().frames).unwrap();
    assert_eq!(envelope.interval_secs, None);
    assert_eq!(envelope.cron.as_deref(), Some("*/5 * * * *"));
    assert!(envelope.headers.guarantee);
}

#[test]
fn schedule_guarantee_can_be_disabled() {
    let run = cli()
        .args(&["schedule", "jobs.tick", "--cron", "0 * * * *", "--no-guarantee"])
        .passes();
    assert_eq!(run.message().frames[1], "");
}

#[test]
fn schedule_with_both_selectors_is_rejected() {
    cli()
        .args(&["schedule", "jobs.tick", "--interval", "60", "--cron", "* * * * *", "--class-arg", "1"])
        .fails_with(1)
        .stdout_empty();
}

#[test]
fn schedule_without_selector_is_rejected() {
    cli().args(&["schedule", "jobs.tick"]).fails_with(1).stdout_empty();
}

#[test]
fn interval_schedule_requires_caller_identity() {
    cli().args(&["schedule", "jobs.tick", "--interval", "60"]).fails_with(1).stdout_empty();
}

#[test]
fn unschedule_skips_schedule_validation() {
    let run = cli().args(&["unschedule", "jobs.tick", "--class-arg", "\"owner-1\""]).passes();

    let message = run.message();
    assert_eq!(message.command, WireCommand::Unschedule);
    assert_eq!(message.frames[2], "-1");
    assert_eq!(message.frames[4], "");
    assert_eq!(decode_run(&message.frames[3]).unwrap().class_args, vec![json!("owner-1")]);
}

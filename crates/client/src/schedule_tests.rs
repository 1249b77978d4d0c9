// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use tw_core::{HeaderFlags, ScheduleKey};
use tw_wire::{Command, FakeTransport, NO_CRON, NO_INTERVAL};

fn caller(id: &str) -> Invocation {
    Invocation::new().class_args(vec![json!(id)])
}

fn sent_envelope(transport: &FakeTransport) -> ScheduleEnvelope {
    let sent = transport.last().expect("nothing sent");
    ScheduleEnvelope::from_frames(sent.command, &sent.frames).expect("invalid frames")
}

#[test]
fn interval_schedule_sends_schedule_command() {
    let transport = FakeTransport::new();

    let msgid =
        schedule(&transport, "jobs:Sync.run", caller("caller-1"), &ScheduleOptions::every(60))
            .unwrap();

    assert_eq!(msgid.unwrap(), "msg-1");
    let sent = transport.last().unwrap();
    assert_eq!(sent.command, Command::Schedule);
    assert_eq!(sent.frames[1], "guarantee");
    assert_eq!(sent.frames[2], "60");
    assert_eq!(sent.frames[4], NO_CRON);
}

#[test]
fn cron_schedule_needs_no_caller_id() {
    let transport = FakeTransport::new();

    schedule(&transport, "jobs.tick", Invocation::new(), &ScheduleOptions::cron_expr("0 * * * *"))
        .unwrap()
        .expect("cron schedule should be sent");

    let sent = transport.last().unwrap();
    assert_eq!(sent.frames[2], NO_INTERVAL);
    assert_eq!(sent.frames[4], "0 * * * *");
}

#[test]
fn both_selectors_send_nothing() {
    let transport = FakeTransport::new();
    let options = ScheduleOptions::every(30).cron("* * * * *");

    let msgid = schedule(&transport, "jobs.tick", caller("c"), &options).unwrap();

    assert!(msgid.is_none());
    assert!(transport.sent().is_empty());
}

#[yare::parameterized(
    unset         = { None,    None },
    zero_interval = { Some(0), None },
    blank_cron    = { None,    Some("   ") },
)]
fn no_active_selector_sends_nothing(interval: Option<u64>, cron: Option<&str>) {
    let transport = FakeTransport::new();
    let options = ScheduleOptions {
        interval_secs: interval,
        cron: cron.map(str::to_string),
        ..ScheduleOptions::default()
    };

    let msgid = schedule(&transport, "jobs.tick", caller("c"), &options).unwrap();

    assert!(msgid.is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn interval_without_caller_id_sends_nothing() {
    let transport = FakeTransport::new();

    let msgid =
        schedule(&transport, "jobs.tick", Invocation::new(), &ScheduleOptions::every(10)).unwrap();

    assert!(msgid.is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn unschedule_skips_selector_and_identity_checks() {
    let transport = FakeTransport::new();

    let msgid =
        unschedule(&transport, "jobs.tick", Invocation::new(), &ScheduleOptions::new()).unwrap();

    assert!(msgid.is_some());
    let sent = transport.last().unwrap();
    assert_eq!(sent.command, Command::Unschedule);
    assert_eq!(sent.frames[2], NO_INTERVAL);
    assert_eq!(sent.frames[4], NO_CRON);
}

#[test]
fn unschedule_with_both_selectors_is_still_sent() {
    let transport = FakeTransport::new();
    let options = ScheduleOptions::every(5).cron("* * * * *").unschedule(true);

    assert!(schedule(&transport, "jobs.tick", caller("c"), &options).unwrap().is_some());
    assert_eq!(transport.last().unwrap().command, Command::Unschedule);
}

#[test]
fn unschedule_matches_schedule_identity() {
    let transport = FakeTransport::new();

    schedule(&transport, "jobs:Sync.run", caller("caller-1"), &ScheduleOptions::every(60)).unwrap();
    let scheduled = sent_envelope(&transport);
    unschedule(&transport, "jobs:Sync.run", caller("caller-1"), &ScheduleOptions::new()).unwrap();
    let cancelled = sent_envelope(&transport);

    assert!(cancelled.unschedule);
    assert_eq!(
        ScheduleKey::for_descriptor(&scheduled.descriptor),
        ScheduleKey::for_descriptor(&cancelled.descriptor)
    );
}

#[test]
fn unlocatable_target_sends_nothing() {
    let transport = FakeTransport::new();

    let msgid = schedule(&transport, "orphan", caller("c"), &ScheduleOptions::every(5)).unwrap();

    assert!(msgid.is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn custom_headers_and_queue() {
    let transport = FakeTransport::new();
    let options = ScheduleOptions::every(5)
        .headers(HeaderFlags::new().reply_requested(true))
        .queue("slow");

    schedule(&transport, "jobs:Sync.run", caller("c"), &options).unwrap();

    let envelope = sent_envelope(&transport);
    assert_eq!(envelope.queue, "slow");
    assert_eq!(envelope.headers, HeaderFlags::new().reply_requested(true));
}

#[test]
fn transport_errors_propagate() {
    let transport = FakeTransport::new();
    transport.reject_with("scheduler unreachable");

    let result = schedule(&transport, "jobs:Sync.run", caller("c"), &ScheduleOptions::every(5));

    assert!(result.is_err());
}

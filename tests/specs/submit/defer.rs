//! `tw defer` specs
//!
//! A one-off job becomes one REQUEST message on stdout.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn defer_function_writes_request() {
    let run = cli().args(&["defer", "reports.build", "--arg", "1", "--arg", "2"]).passes();

    let message = run.message();
    assert_eq!(message.command, WireCommand::Request);
    assert_eq!(message.frames.len(), 3);
    assert_eq!(message.frames[0], "default");
    assert_eq!(message.frames[1], "");

    let job = decode_run(&message.frames[2]).unwrap();
    assert_eq!(job, JobDescriptor::new("reports", "build").args(vec![json!(1), json!(2)]));
}

#[test]
fn defer_method_carries_constructor_args() {
    let run = cli()
        .args(&[
            "defer",
            "shop:Cart.checkout",
            "--class-arg",
            "\"cart-9\"",
            "--class-kwarg",
            "currency=\"EUR\"",
            "--kwarg",
            "dry_run=true",
        ])
        .passes();

    let envelope = RequestEnvelope::from_frames(&run.message().frames).unwrap();
    assert_eq!(envelope.descriptor.path, "shop:Cart");
    assert_eq!(envelope.descriptor.callable, "checkout");
    assert_eq!(envelope.descriptor.class_args, vec![json!("cart-9")]);
    assert_eq!(envelope.descriptor.class_kwargs.get("currency"), Some(&json!("EUR")));
    assert_eq!(envelope.descriptor.kwargs.get("dry_run"), Some(&json!(true)));
}

#[test]
fn defer_hints_are_encoded_in_order() {
    let run = cli()
        .args(&["defer", "jobs.send", "--retry", "3", "--guarantee", "--reply", "--queue", "mail"])
        .passes();

    let message = run.message();
    assert_eq!(message.frames[0], "mail");
    assert_eq!(message.frames[1], "reply-requested,guarantee,retry-count:3");
}

#[test]
fn defer_uses_default_queue_from_env() {
    let run = cli().env("TW_DEFAULT_QUEUE", "bulk").args(&["defer", "jobs.send"]).passes();
    assert_eq!(run.message().frames[0], "bulk");
}

#[test]
fn defer_message_ids_are_unique() {
    let first = cli().args(&["defer", "jobs.send"]).passes().message();
    let second = cli().args(&["defer", "jobs.send"]).passes().message();
    assert_ne!(first.msgid, second.msgid);
}

#[test]
fn defer_without_module_is_rejected() {
    cli().args(&["defer", "send"]).fails_with(1).stdout_empty().stderr_has("rejected");
}

#[test]
fn defer_bad_json_argument_is_usage_error() {
    cli().args(&["defer", "jobs.send", "--arg", "not-json"]).fails_with(2).stdout_empty();
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SCHEDULE / UNSCHEDULE submission.

use tw_core::env::queue_or_default;
use tw_core::{JobDescriptor, Locate};
use tw_wire::{MessageId, ScheduleEnvelope, Transport, TransportError};

use crate::error::ValidationError;
use crate::{Invocation, ScheduleOptions};

/// Schedule-only checks. Unschedules cancel by identity and skip them.
fn validate(invocation: &Invocation, options: &ScheduleOptions) -> Result<(), ValidationError> {
    if options.unschedule {
        return Ok(());
    }
    match (options.active_interval(), options.active_cron()) {
        (Some(_), Some(_)) => Err(ValidationError::BothSelectors),
        (None, None) => Err(ValidationError::NoSelector),
        (Some(_), None) if invocation.class_args.is_empty() => {
            Err(ValidationError::MissingCallerId)
        }
        _ => Ok(()),
    }
}

/// Ask the scheduler to run `func` on an interval or cron schedule, or to
/// cancel one when `options.unschedule` is set.
///
/// Interval schedules need a caller id as the first constructor argument;
/// an unschedule with the same caller id, path, and callable cancels it.
/// Returns `Ok(None)` and logs when validation fails.
pub fn schedule<T, F>(
    transport: &T,
    func: &F,
    invocation: Invocation,
    options: &ScheduleOptions,
) -> Result<Option<MessageId>, TransportError>
where
    T: Transport + ?Sized,
    F: Locate + ?Sized,
{
    if let Err(error) = validate(&invocation, options) {
        tracing::error!(%error, unschedule = options.unschedule, "schedule not sent");
        return Ok(None);
    }
    let descriptor = match JobDescriptor::for_callable(func) {
        Ok(descriptor) => invocation.apply(descriptor),
        Err(e) => {
            let error = ValidationError::from(e);
            tracing::error!(%error, unschedule = options.unschedule, "schedule not sent");
            return Ok(None);
        }
    };
    send_schedule_request(transport, &descriptor, options).map(Some)
}

/// Cancel the schedule matching `func` and the caller id in `invocation`.
pub fn unschedule<T, F>(
    transport: &T,
    func: &F,
    invocation: Invocation,
    options: &ScheduleOptions,
) -> Result<Option<MessageId>, TransportError>
where
    T: Transport + ?Sized,
    F: Locate + ?Sized,
{
    schedule(transport, func, invocation, &options.clone().unschedule(true))
}

/// Send a SCHEDULE or UNSCHEDULE for `descriptor` without validation.
///
/// Inactive selectors go out as the `"-1"` interval and empty cron placeholders.
pub fn send_schedule_request<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &JobDescriptor,
    options: &ScheduleOptions,
) -> Result<MessageId, TransportError> {
    let envelope = ScheduleEnvelope {
        queue: queue_or_default(options.queue.as_deref()),
        headers: options.headers,
        interval_secs: options.active_interval(),
        cron: options.active_cron().map(str::to_string),
        descriptor: descriptor.clone(),
        unschedule: options.unschedule,
    };
    let command = envelope.command();
    let msgid = transport.send(command, &envelope.to_frames()?)?;
    tracing::info!(
        %msgid,
        %command,
        queue = %envelope.queue,
        path = %descriptor.path,
        callable = %descriptor.callable,
        interval_secs = ?envelope.interval_secs,
        cron = ?envelope.cron,
        "schedule sent"
    );
    Ok(msgid)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REQUEST submission.

use tw_core::env::queue_or_default;
use tw_core::{HeaderFlags, JobDescriptor, Locate};
use tw_wire::{MessageId, RequestEnvelope, Transport, TransportError};

use crate::error::ValidationError;
use crate::{DeferOptions, Invocation};

/// Send `func` to a worker.
///
/// Returns `Ok(None)` when `func` cannot be located (not callable, no name,
/// or no import path); the reason is logged and nothing is sent. Retries in
/// `options` are advisory metadata for the broker.
pub fn defer_job<T, F>(
    transport: &T,
    func: &F,
    invocation: Invocation,
    options: &DeferOptions,
) -> Result<Option<MessageId>, TransportError>
where
    T: Transport + ?Sized,
    F: Locate + ?Sized,
{
    let descriptor = match JobDescriptor::for_callable(func) {
        Ok(descriptor) => invocation.apply(descriptor),
        Err(e) => {
            let error = ValidationError::from(e);
            tracing::error!(%error, "job not deferred");
            return Ok(None);
        }
    };
    let msgid = send_request(transport, &descriptor, options.headers(), options.queue.as_deref())?;
    Ok(Some(msgid))
}

/// Send a REQUEST for `descriptor` with the given hints.
///
/// A missing or blank `queue` falls back to the default queue.
pub fn send_request<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &JobDescriptor,
    headers: HeaderFlags,
    queue: Option<&str>,
) -> Result<MessageId, TransportError> {
    let envelope =
        RequestEnvelope { queue: queue_or_default(queue), headers, descriptor: descriptor.clone() };
    let msgid = transport.send(envelope.command(), &envelope.to_frames()?)?;
    tracing::info!(
        %msgid,
        queue = %envelope.queue,
        path = %descriptor.path,
        callable = %descriptor.callable,
        headers = %headers,
        "job deferred"
    );
    Ok(msgid)
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

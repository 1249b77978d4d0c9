// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-worker: execute job descriptors in an isolated worker.
//!
//! Targets are looked up in a [`Registry`] built once at startup, mapping
//! `(module, member)` to handlers. A [`WorkerProcess`] pulls one job at a
//! time from its inbound channel, runs it to completion, and always answers
//! with exactly one completion token. A failing job is logged, never fatal.

mod channel;
mod child;
mod error;
mod execute;
mod process;
mod registry;

pub use channel::{
    ChannelError, Completion, CompletionSink, JobSource, StdioSink, StdioSource, WorkerJob,
    WorkerMessage,
};
pub use child::{ChildError, ChildWorker};
pub use error::{HandlerError, JobError, JobErrorKind};
pub use execute::execute_job;
pub use process::{WorkerProcess, WorkerState, WorkerStats};
pub use registry::{Args, ClassBuilder, HandlerResult, Registered, Registry, RegistryBuilder};

#[cfg(test)]
mod test_fixtures;

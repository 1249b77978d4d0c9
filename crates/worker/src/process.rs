// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker loop.

use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::channel::{ChannelError, Completion, CompletionSink, JobSource, WorkerMessage};
use crate::error::JobError;
use crate::execute::execute_job;
use crate::registry::Registry;

/// Where a worker is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting on the inbound channel.
    Idle,
    Executing,
    ReportingDone,
    Terminated,
}

tw_core::simple_display! {
    WorkerState {
        Idle => "idle",
        Executing => "executing",
        ReportingDone => "reporting_done",
        Terminated => "terminated",
    }
}

/// Job counts for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub completed: u64,
    pub failed: u64,
}

impl WorkerStats {
    pub fn total(&self) -> u64 {
        self.completed + self.failed
    }
}

/// Executes jobs from `source` one at a time, answering each on `sink`.
pub struct WorkerProcess<S, C> {
    registry: Registry,
    source: S,
    sink: C,
    state: WorkerState,
    stats: WorkerStats,
}

impl<S: JobSource, C: CompletionSink> WorkerProcess<S, C> {
    pub fn new(registry: Registry, source: S, sink: C) -> Self {
        Self { registry, source, sink, state: WorkerState::Idle, stats: WorkerStats::default() }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn stats(&self) -> WorkerStats {
        self.stats
    }

    /// Run until the shutdown sentinel arrives.
    ///
    /// Every job, including one that fails to decode, resolve, or execute,
    /// is answered with exactly one [`Completion::Done`]. Only channel
    /// failures end the loop early.
    pub fn run(&mut self) -> Result<WorkerStats, ChannelError> {
        info!("worker started");
        loop {
            self.state = WorkerState::Idle;
            let (target, outcome) = match self.source.recv() {
                Ok(WorkerMessage::Shutdown) => break,
                Ok(WorkerMessage::Job(job)) => {
                    self.state = WorkerState::Executing;
                    match job.decode() {
                        Ok(descriptor) => {
                            debug!(
                                path = %descriptor.path,
                                callable = %descriptor.callable,
                                "executing job"
                            );
                            let outcome = execute_job(&self.registry, &descriptor);
                            (Some((descriptor.path, descriptor.callable)), outcome)
                        }
                        Err(e) => (None, Err(JobError::from(e))),
                    }
                }
                Err(ChannelError::Malformed(e)) => {
                    self.state = WorkerState::Executing;
                    (None, Err(JobError::Decode(e.into())))
                }
                Err(e) => {
                    self.state = WorkerState::Terminated;
                    warn!(error = %e, "worker channel failed");
                    return Err(e);
                }
            };

            match (outcome, target) {
                (Ok(_), _) => self.stats.completed += 1,
                (Err(e), Some((path, callable))) => {
                    self.stats.failed += 1;
                    error!(kind = %e.kind(), %path, %callable, error = %e, "job failed");
                }
                (Err(e), None) => {
                    self.stats.failed += 1;
                    error!(kind = %e.kind(), error = %e, "job failed");
                }
            }

            self.state = WorkerState::ReportingDone;
            if let Err(e) = self.sink.send(Completion::Done) {
                self.state = WorkerState::Terminated;
                warn!(error = %e, "failed to report completion");
                return Err(e);
            }
        }

        self.state = WorkerState::Terminated;
        info!(completed = self.stats.completed, failed = self.stats.failed, "worker stopped");
        Ok(self.stats)
    }
}

impl<S, C> WorkerProcess<S, C>
where
    S: JobSource + Send + 'static,
    C: CompletionSink + Send + 'static,
{
    /// Run the loop on a dedicated OS thread.
    pub fn spawn(mut self) -> std::io::Result<JoinHandle<Result<WorkerStats, ChannelError>>> {
        thread::Builder::new().name("tw-worker".to_string()).spawn(move || self.run())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drive a worker running as a separate OS process over its stdio.

use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};
use tw_core::JobDescriptor;
use tw_wire::{read_message, write_message, ProtocolError};

use crate::channel::{Completion, WorkerJob, WorkerMessage};

#[derive(Debug, Error)]
pub enum ChildError {
    #[error("failed to spawn worker: {0}")]
    Spawn(std::io::Error),

    #[error("worker io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("unexpected token from worker: {0}")]
    UnexpectedToken(String),

    #[error("worker {0} pipe unavailable")]
    MissingPipe(&'static str),
}

/// One worker process. Jobs are submitted one at a time; each is answered
/// with a completion token on the child's stdout.
pub struct ChildWorker {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

impl ChildWorker {
    /// Spawn `command` with piped stdin/stdout. The child is killed if the
    /// handle is dropped without [`shutdown`](Self::shutdown).
    pub fn spawn(mut command: Command) -> Result<Self, ChildError> {
        command.stdin(Stdio::piped()).stdout(Stdio::piped()).kill_on_drop(true);
        let mut child = command.spawn().map_err(ChildError::Spawn)?;
        let stdin = child.stdin.take().ok_or(ChildError::MissingPipe("stdin"))?;
        let stdout = child.stdout.take().ok_or(ChildError::MissingPipe("stdout"))?;
        info!(pid = ?child.id(), "spawned worker process");
        Ok(Self { child, stdin, stdout })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub async fn submit(&mut self, job: &JobDescriptor) -> Result<(), ChildError> {
        debug!(path = %job.path, callable = %job.callable, "submitting job to worker");
        self.send(&WorkerMessage::Job(WorkerJob::from(job))).await
    }

    /// Wait for the next completion token.
    pub async fn wait_done(&mut self) -> Result<Completion, ChildError> {
        let body = read_message(&mut self.stdout).await?;
        serde_json::from_slice(&body)
            .map_err(|_| ChildError::UnexpectedToken(String::from_utf8_lossy(&body).into_owned()))
    }

    /// Submit `job` and wait for its completion token.
    pub async fn run(&mut self, job: &JobDescriptor) -> Result<Completion, ChildError> {
        self.submit(job).await?;
        self.wait_done().await
    }

    /// Send the shutdown sentinel and wait for the process to exit.
    pub async fn shutdown(mut self) -> Result<ExitStatus, ChildError> {
        self.send(&WorkerMessage::Shutdown).await?;
        drop(self.stdin);
        let status = self.child.wait().await?;
        info!(%status, "worker process exited");
        Ok(status)
    }

    async fn send(&mut self, message: &WorkerMessage) -> Result<(), ChildError> {
        let body = tw_wire::encode(message)?;
        write_message(&mut self.stdin, &body).await?;
        Ok(())
    }
}

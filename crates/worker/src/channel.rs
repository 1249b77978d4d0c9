// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker channels: jobs in, completion tokens out.
//!
//! In-process workers use tokio mpsc channels through their blocking ends.
//! Out-of-process workers speak length-prefixed JSON over stdio: each job is
//! a descriptor object, `null` is the shutdown sentinel, and every finished
//! job is answered with `"DONE"`.

use std::io::{Read, Write};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;
use tw_core::{DescriptorError, JobDescriptor, Kwargs};
use tw_wire::{blocking, ProtocolError};

/// A job as received, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerJob(Value);

impl WorkerJob {
    pub fn raw(value: Value) -> Self {
        Self(value)
    }

    /// Decode and validate the descriptor.
    pub fn decode(&self) -> Result<JobDescriptor, DescriptorError> {
        let descriptor: JobDescriptor = serde_json::from_value(self.0.clone())?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&JobDescriptor> for WorkerJob {
    fn from(descriptor: &JobDescriptor) -> Self {
        let mut job = Map::new();
        job.insert("path".into(), Value::String(descriptor.path.clone()));
        job.insert("callable".into(), Value::String(descriptor.callable.clone()));
        job.insert("args".into(), Value::Array(descriptor.args.clone()));
        job.insert("kwargs".into(), object(&descriptor.kwargs));
        job.insert("class_args".into(), Value::Array(descriptor.class_args.clone()));
        job.insert("class_kwargs".into(), object(&descriptor.class_kwargs));
        Self(Value::Object(job))
    }
}

fn object(kwargs: &Kwargs) -> Value {
    Value::Object(kwargs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

impl From<JobDescriptor> for WorkerJob {
    fn from(descriptor: JobDescriptor) -> Self {
        Self::from(&descriptor)
    }
}

/// One value read from a worker's inbound channel.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    Job(WorkerJob),
    /// Sentinel: stop the worker.
    Shutdown,
}

impl Serialize for WorkerMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WorkerMessage::Job(job) => job.serialize(serializer),
            WorkerMessage::Shutdown => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for WorkerMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => WorkerMessage::Shutdown,
            value => WorkerMessage::Job(WorkerJob(value)),
        })
    }
}

/// The token written after every job, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    #[serde(rename = "DONE")]
    Done,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,

    /// A message arrived but was not JSON. The worker treats it as a failed job.
    #[error("malformed message: {0}")]
    Malformed(serde_json::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Inbound side of a worker. `recv` blocks until a message arrives.
pub trait JobSource {
    fn recv(&mut self) -> Result<WorkerMessage, ChannelError>;
}

/// Outbound side of a worker.
pub trait CompletionSink {
    fn send(&mut self, token: Completion) -> Result<(), ChannelError>;
}

impl JobSource for mpsc::Receiver<WorkerMessage> {
    fn recv(&mut self) -> Result<WorkerMessage, ChannelError> {
        self.blocking_recv().ok_or(ChannelError::Closed)
    }
}

impl JobSource for mpsc::UnboundedReceiver<WorkerMessage> {
    fn recv(&mut self) -> Result<WorkerMessage, ChannelError> {
        self.blocking_recv().ok_or(ChannelError::Closed)
    }
}

impl CompletionSink for mpsc::Sender<Completion> {
    fn send(&mut self, token: Completion) -> Result<(), ChannelError> {
        self.blocking_send(token).map_err(|_| ChannelError::Closed)
    }
}

impl CompletionSink for mpsc::UnboundedSender<Completion> {
    fn send(&mut self, token: Completion) -> Result<(), ChannelError> {
        mpsc::UnboundedSender::send(self, token).map_err(|_| ChannelError::Closed)
    }
}

/// Length-prefixed JSON messages from a byte stream (usually stdin).
pub struct StdioSource<R> {
    reader: R,
}

impl<R: Read> StdioSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> JobSource for StdioSource<R> {
    fn recv(&mut self) -> Result<WorkerMessage, ChannelError> {
        let body = match blocking::read_message(&mut self.reader) {
            Ok(body) => body,
            Err(ProtocolError::ConnectionClosed) => return Err(ChannelError::Closed),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&body).map_err(ChannelError::Malformed)
    }
}

/// Length-prefixed completion tokens to a byte stream (usually stdout).
pub struct StdioSink<W> {
    writer: W,
}

impl<W: Write> StdioSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CompletionSink for StdioSink<W> {
    fn send(&mut self, token: Completion) -> Result<(), ChannelError> {
        let body = serde_json::to_vec(&token).map_err(ProtocolError::from)?;
        blocking::write_message(&mut self.writer, &body)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;

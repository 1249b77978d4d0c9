// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sending commands.

use std::io::{Read, Write};

use parking_lot::Mutex;
use thiserror::Error;

use crate::framing::{blocking, decode, encode, ProtocolError};
use crate::{Command, MessageId};

/// Protocol tag carried in every message header.
pub const PROTOCOL_VERSION: &str = "eMQP/1.0";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode frames: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("transport rejected {command}: {reason}")]
    Rejected { command: Command, reason: String },
}

/// Delivers a command and its frames, returning the id of the sent message.
pub trait Transport {
    fn send(&self, command: Command, frames: &[String]) -> Result<MessageId, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, command: Command, frames: &[String]) -> Result<MessageId, TransportError> {
        (**self).send(command, frames)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, command: Command, frames: &[String]) -> Result<MessageId, TransportError> {
        (**self).send(command, frames)
    }
}

/// A decoded message: header plus command frames.
#[derive(Debug, Clone, PartialEq)]
pub struct WireMessage {
    pub command: Command,
    pub msgid: MessageId,
    pub frames: Vec<String>,
}

impl WireMessage {
    fn to_parts(&self) -> Vec<String> {
        let mut parts = vec![
            String::new(),
            PROTOCOL_VERSION.to_string(),
            self.command.to_string(),
            self.msgid.to_string(),
        ];
        parts.extend(self.frames.iter().cloned());
        parts
    }

    fn from_parts(mut parts: Vec<String>) -> Result<Self, ProtocolError> {
        if parts.len() < 4 {
            return Err(ProtocolError::Invalid(format!("{} header frames, need 4", parts.len())));
        }
        let frames = parts.split_off(4);
        if !parts[0].is_empty() {
            return Err(ProtocolError::Invalid("missing empty delimiter frame".to_string()));
        }
        if parts[1] != PROTOCOL_VERSION {
            return Err(ProtocolError::Invalid(format!("unsupported protocol `{}`", parts[1])));
        }
        let command = parts[2]
            .parse::<Command>()
            .map_err(|c| ProtocolError::Invalid(format!("unknown command `{}`", c)))?;
        Ok(Self { command, msgid: MessageId::from_string(parts[3].clone()), frames })
    }
}

/// Read one framed message written by [`FramedTransport`].
pub fn read_frames<R: Read>(reader: &mut R) -> Result<WireMessage, ProtocolError> {
    let body = blocking::read_message(reader)?;
    WireMessage::from_parts(decode(&body)?)
}

/// Writes each command as a length-prefixed message to a byte stream.
pub struct FramedTransport<W> {
    writer: Mutex<W>,
}

impl<W: Write> FramedTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> Transport for FramedTransport<W> {
    fn send(&self, command: Command, frames: &[String]) -> Result<MessageId, TransportError> {
        let message = WireMessage { command, msgid: MessageId::new(), frames: frames.to_vec() };
        let body = encode(&message.to_parts())?;
        blocking::write_message(&mut *self.writer.lock(), &body)?;
        tracing::debug!(%command, msgid = %message.msgid, frames = frames.len(), "sent message");
        Ok(message.msgid)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Transport, TransportError};
    use crate::{Command, MessageId};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded send
    #[derive(Debug, Clone, PartialEq)]
    pub struct SentMessage {
        pub command: Command,
        pub frames: Vec<String>,
        pub msgid: MessageId,
    }

    #[derive(Default)]
    struct FakeTransportState {
        sent: Vec<SentMessage>,
        reject: Option<String>,
    }

    /// Fake transport for testing; ids are `msg-1`, `msg-2`, ...
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        inner: Arc<Mutex<FakeTransportState>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every following send fail with `reason`.
        pub fn reject_with(&self, reason: impl Into<String>) {
            self.inner.lock().reject = Some(reason.into());
        }

        /// Get all recorded sends
        pub fn sent(&self) -> Vec<SentMessage> {
            self.inner.lock().sent.clone()
        }

        pub fn last(&self) -> Option<SentMessage> {
            self.inner.lock().sent.last().cloned()
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, command: Command, frames: &[String]) -> Result<MessageId, TransportError> {
            let mut state = self.inner.lock();
            if let Some(reason) = &state.reject {
                return Err(TransportError::Rejected { command, reason: reason.clone() });
            }
            let msgid = MessageId::from_string(format!("msg-{}", state.sent.len() + 1));
            state.sent.push(SentMessage { command, frames: frames.to_vec(), msgid: msgid.clone() });
            Ok(msgid)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, SentMessage};

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;

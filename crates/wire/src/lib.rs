// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire contract between producers, the broker, and the scheduler.
//!
//! A command is an ordered list of string frames. Over a byte stream each
//! message is written as a 4-byte length prefix (big-endian) + JSON array of
//! frames: `["", "eMQP/1.0", COMMAND, msgid, ...command frames]`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod command;
mod envelope;
mod framing;
mod transport;

pub use command::{Command, MessageId};
pub use envelope::{EnvelopeError, RequestEnvelope, ScheduleEnvelope, NO_CRON, NO_INTERVAL};
pub use framing::{blocking, decode, encode, read_message, write_message, ProtocolError};
pub use framing::MAX_MESSAGE_SIZE;
pub use transport::{
    read_frames, FramedTransport, Transport, TransportError, WireMessage, PROTOCOL_VERSION,
};

#[cfg(any(test, feature = "test-support"))]
pub use transport::{FakeTransport, SentMessage};

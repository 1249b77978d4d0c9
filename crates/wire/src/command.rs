// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Commands a producer sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Request,
    Schedule,
    Unschedule,
}

tw_core::simple_display! {
    Command {
        Request => "REQUEST",
        Schedule => "SCHEDULE",
        Unschedule => "UNSCHEDULE",
    }
}

impl Command {
    /// Number of frames the command carries after the message header.
    pub fn frame_count(self) -> usize {
        match self {
            Command::Request => 3,
            Command::Schedule | Command::Unschedule => 5,
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUEST" => Ok(Command::Request),
            "SCHEDULE" => Ok(Command::Schedule),
            "UNSCHEDULE" => Ok(Command::Unschedule),
            other => Err(other.to_string()),
        }
    }
}

/// Id the transport assigns to each sent message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Random UUIDv4 id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl PartialEq<&str> for MessageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command envelopes and their frame layouts.
//!
//! | Command               | Frames                                                  |
//! |-----------------------|---------------------------------------------------------|
//! | REQUEST               | queue, headers, run message                             |
//! | SCHEDULE / UNSCHEDULE | queue, headers, interval secs or "-1", run message, cron or "" |

use thiserror::Error;
use tw_core::{decode_run, encode_run, DescriptorError, HeaderError, HeaderFlags, JobDescriptor};

use crate::Command;

/// Interval frame value when the schedule is cron-based (or an unschedule).
pub const NO_INTERVAL: &str = "-1";

/// Cron frame value when the schedule is interval-based.
pub const NO_CRON: &str = "";

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("{command} expects {expected} frames, got {actual}")]
    FrameCount { command: Command, expected: usize, actual: usize },

    #[error("{0} is not a schedule command")]
    NotSchedule(Command),

    #[error("invalid interval frame `{0}`")]
    Interval(String),

    #[error(transparent)]
    Headers(#[from] HeaderError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

fn expect_frames(command: Command, frames: &[String]) -> Result<(), EnvelopeError> {
    let expected = command.frame_count();
    if frames.len() != expected {
        return Err(EnvelopeError::FrameCount { command, expected, actual: frames.len() });
    }
    Ok(())
}

/// A REQUEST: run the descriptor once on `queue`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub queue: String,
    pub headers: HeaderFlags,
    pub descriptor: JobDescriptor,
}

impl RequestEnvelope {
    pub fn command(&self) -> Command {
        Command::Request
    }

    pub fn to_frames(&self) -> Result<Vec<String>, serde_json::Error> {
        Ok(vec![self.queue.clone(), self.headers.to_csv(), encode_run(&self.descriptor)?])
    }

    pub fn from_frames(frames: &[String]) -> Result<Self, EnvelopeError> {
        expect_frames(Command::Request, frames)?;
        Ok(Self {
            queue: frames[0].clone(),
            headers: HeaderFlags::parse(&frames[1])?,
            descriptor: decode_run(&frames[2])?,
        })
    }
}

/// A SCHEDULE or UNSCHEDULE.
///
/// Interval and cron selectors are optional here; the submitter enforces
/// that a schedule names exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEnvelope {
    pub queue: String,
    pub headers: HeaderFlags,
    pub interval_secs: Option<u64>,
    pub cron: Option<String>,
    pub descriptor: JobDescriptor,
    pub unschedule: bool,
}

impl ScheduleEnvelope {
    pub fn command(&self) -> Command {
        if self.unschedule {
            Command::Unschedule
        } else {
            Command::Schedule
        }
    }

    pub fn to_frames(&self) -> Result<Vec<String>, serde_json::Error> {
        Ok(vec![
            self.queue.clone(),
            self.headers.to_csv(),
            self.interval_secs.map(|s| s.to_string()).unwrap_or_else(|| NO_INTERVAL.to_string()),
            encode_run(&self.descriptor)?,
            self.cron.clone().unwrap_or_default(),
        ])
    }

    pub fn from_frames(command: Command, frames: &[String]) -> Result<Self, EnvelopeError> {
        if command == Command::Request {
            return Err(EnvelopeError::NotSchedule(command));
        }
        expect_frames(command, frames)?;

        let interval_secs = match frames[2].trim() {
            NO_INTERVAL => None,
            raw => Some(raw.parse::<u64>().map_err(|_| EnvelopeError::Interval(raw.to_string()))?),
        };
        let cron = Some(frames[4].trim()).filter(|c| !c.is_empty()).map(str::to_string);

        Ok(Self {
            queue: frames[0].clone(),
            headers: HeaderFlags::parse(&frames[1])?,
            interval_secs,
            cron,
            descriptor: decode_run(&frames[3])?,
            unschedule: command == Command::Unschedule,
        })
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;

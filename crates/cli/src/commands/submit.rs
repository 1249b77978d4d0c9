// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission commands: defer, schedule, unschedule.
//!
//! Each writes exactly one framed message to stdout, or nothing when the
//! submission is rejected.

use std::io;

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tw_client::{DeferOptions, Invocation, ScheduleOptions};
use tw_core::{HeaderFlags, Kwargs};
use tw_wire::{Command, FramedTransport, MessageId};

use crate::exit_error::ExitError;

/// Target and arguments shared by every submission.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Dotted target: `pkg.module.func` or `pkg.module:Class.method`
    pub target: String,

    /// Positional argument as JSON (repeatable)
    #[arg(long = "arg", value_name = "JSON", value_parser = parse_json)]
    pub args: Vec<Value>,

    /// Keyword argument as KEY=JSON (repeatable)
    #[arg(long = "kwarg", value_name = "KEY=JSON", value_parser = parse_kwarg)]
    pub kwargs: Vec<(String, Value)>,

    /// Constructor argument as JSON (repeatable)
    #[arg(long = "class-arg", value_name = "JSON", value_parser = parse_json)]
    pub class_args: Vec<Value>,

    /// Constructor keyword argument as KEY=JSON (repeatable)
    #[arg(long = "class-kwarg", value_name = "KEY=JSON", value_parser = parse_kwarg)]
    pub class_kwargs: Vec<(String, Value)>,

    /// Queue name (default: $TW_DEFAULT_QUEUE or "default")
    #[arg(long, short)]
    pub queue: Option<String>,
}

impl TargetArgs {
    pub fn invocation(&self) -> Invocation {
        let mut invocation =
            Invocation::new().args(self.args.clone()).class_args(self.class_args.clone());
        if !self.kwargs.is_empty() {
            invocation = invocation.kwargs(collect_kwargs(&self.kwargs));
        }
        if !self.class_kwargs.is_empty() {
            invocation = invocation.class_kwargs(collect_kwargs(&self.class_kwargs));
        }
        invocation
    }
}

/// Execution hints, all off by default.
#[derive(Args, Debug, Clone, Default)]
pub struct HintArgs {
    /// Ask the broker to route the return value back
    #[arg(long)]
    pub reply: bool,

    /// Ask the broker to persist the job until acknowledged
    #[arg(long)]
    pub guarantee: bool,

    /// Number of retries on failure (0 = none)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub retry: u32,
}

impl HintArgs {
    pub fn defer_options(&self) -> DeferOptions {
        DeferOptions::new()
            .reply_requested(self.reply)
            .guarantee(self.guarantee)
            .retry_count(self.retry)
    }
}

#[derive(Args, Debug)]
pub struct DeferArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub hints: HintArgs,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Seconds between runs (requires --class-arg as caller identity)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Cron expression, e.g. "*/5 * * * *"
    #[arg(long, value_name = "EXPR")]
    pub cron: Option<String>,

    /// Ask the broker to route the return value back
    #[arg(long)]
    pub reply: bool,

    /// Do not request guaranteed delivery (schedules are guaranteed by default)
    #[arg(long)]
    pub no_guarantee: bool,

    /// Number of retries on failure (0 = none)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub retry: u32,
}

impl ScheduleArgs {
    pub fn options(&self) -> ScheduleOptions {
        let headers = HeaderFlags::new()
            .reply_requested(self.reply)
            .guarantee(!self.no_guarantee)
            .retry_count(self.retry);
        let mut options = ScheduleOptions::new().headers(headers);
        if let Some(secs) = self.interval {
            options = options.interval_secs(secs);
        }
        if let Some(cron) = &self.cron {
            options = options.cron(cron.as_str());
        }
        if let Some(queue) = &self.target.queue {
            options = options.queue(queue.as_str());
        }
        options
    }
}

#[derive(Args, Debug)]
pub struct UnscheduleArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn defer(args: DeferArgs) -> Result<()> {
    let transport = FramedTransport::new(io::stdout());
    let mut options = args.hints.defer_options();
    if let Some(queue) = &args.target.queue {
        options = options.queue(queue.as_str());
    }
    let msgid = tw_client::defer_job(
        &transport,
        args.target.target.as_str(),
        args.target.invocation(),
        &options,
    )?;
    submitted(Command::Request, msgid)
}

pub fn schedule(args: ScheduleArgs) -> Result<()> {
    let transport = FramedTransport::new(io::stdout());
    let options = args.options();
    let msgid = tw_client::schedule(
        &transport,
        args.target.target.as_str(),
        args.target.invocation(),
        &options,
    )?;
    submitted(Command::Schedule, msgid)
}

pub fn unschedule(args: UnscheduleArgs) -> Result<()> {
    let transport = FramedTransport::new(io::stdout());
    let mut options = ScheduleOptions::new();
    if let Some(queue) = &args.target.queue {
        options = options.queue(queue.as_str());
    }
    let msgid = tw_client::unschedule(
        &transport,
        args.target.target.as_str(),
        args.target.invocation(),
        &options,
    )?;
    submitted(Command::Unschedule, msgid)
}

fn submitted(command: Command, msgid: Option<MessageId>) -> Result<()> {
    match msgid {
        Some(msgid) => {
            tracing::info!(%command, %msgid, "submitted");
            Ok(())
        }
        None => Err(ExitError::rejected(command).into()),
    }
}

fn collect_kwargs(pairs: &[(String, Value)]) -> Kwargs {
    pairs.iter().cloned().collect()
}

pub fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON `{s}`: {e}"))
}

pub fn parse_kwarg(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s.split_once('=').ok_or_else(|| format!("expected KEY=JSON, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), parse_json(value)?))
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;

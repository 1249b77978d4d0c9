// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use tw_core::{HeaderFlags, JobDescriptor, Kwargs};

/// Arguments for one call: method/function arguments plus constructor
/// arguments when the target is a method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub args: Vec<Value>,
    pub kwargs: Option<Kwargs>,
    pub class_args: Vec<Value>,
    pub class_kwargs: Option<Kwargs>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    tw_core::setters! {
        set {
            args: Vec<Value>,
            class_args: Vec<Value>,
        }
        option {
            kwargs: Kwargs,
            class_kwargs: Kwargs,
        }
    }

    /// Fill a located descriptor with these arguments; absent kwargs become empty.
    pub(crate) fn apply(self, descriptor: JobDescriptor) -> JobDescriptor {
        descriptor
            .args(self.args)
            .kwargs(self.kwargs.unwrap_or_default())
            .class_args(self.class_args)
            .class_kwargs(self.class_kwargs.unwrap_or_default())
    }
}

/// Hints and routing for a one-off job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeferOptions {
    pub reply_requested: bool,
    pub guarantee: bool,
    pub retry_count: u32,
    /// Falls back to the default queue when missing or blank.
    pub queue: Option<String>,
}

impl DeferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    tw_core::setters! {
        set {
            reply_requested: bool,
            guarantee: bool,
            retry_count: u32,
        }
        option {
            queue: String,
        }
    }

    pub fn headers(&self) -> HeaderFlags {
        HeaderFlags {
            reply_requested: self.reply_requested,
            guarantee: self.guarantee,
            retry_count: self.retry_count,
        }
    }
}

/// Timing, hints, and routing for a recurring job.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOptions {
    /// Seconds between runs; zero counts as unset.
    pub interval_secs: Option<u64>,
    /// Cron expression, e.g. `*/5 * * * *`; blank counts as unset.
    pub cron: Option<String>,
    pub headers: HeaderFlags,
    pub queue: Option<String>,
    pub unschedule: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            interval_secs: None,
            cron: None,
            // schedules default to guaranteed delivery
            headers: HeaderFlags::new().guarantee(true),
            queue: None,
            unschedule: false,
        }
    }
}

impl ScheduleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every `secs` seconds.
    pub fn every(secs: u64) -> Self {
        Self::default().interval_secs(secs)
    }

    /// Run on a cron expression.
    pub fn cron_expr(expr: impl Into<String>) -> Self {
        Self::default().cron(expr)
    }

    tw_core::setters! {
        set {
            headers: HeaderFlags,
            unschedule: bool,
        }
        option {
            interval_secs: u64,
            cron: String,
            queue: String,
        }
    }

    /// Interval, if it selects the schedule.
    pub fn active_interval(&self) -> Option<u64> {
        self.interval_secs.filter(|&s| s > 0)
    }

    /// Cron expression, if it selects the schedule.
    pub fn active_cron(&self) -> Option<&str> {
        self.cron.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

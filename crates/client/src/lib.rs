// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-client: submit jobs and schedules.
//!
//! Submitters never fail on bad input: validation problems are logged and
//! the call returns `Ok(None)`. Transport failures come back as `Err`.

mod error;
mod options;
mod request;
mod schedule;

pub use error::ValidationError;
pub use options::{DeferOptions, Invocation, ScheduleOptions};
pub use request::{defer_job, send_request};
pub use schedule::{schedule, send_schedule_request, unschedule};

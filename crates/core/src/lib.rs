// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-core: job descriptors and execution hints shared by producers and workers

pub mod macros;

pub mod descriptor;
pub mod env;
pub mod headers;
pub mod locate;
pub mod schedule_key;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use descriptor::{
    decode_run, encode_run, CallPath, DescriptorError, JobDescriptor, Kwargs, RunMessage,
    RUN_SUBCOMMAND,
};
pub use headers::{HeaderError, HeaderFlags};
pub use locate::{CallableLocation, Locate, LocateError};
pub use schedule_key::ScheduleKey;

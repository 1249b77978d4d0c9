// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use tw_core::LocateError;

/// Reasons a submission is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("specify either `interval_secs` or `cron`, not both")]
    BothSelectors,

    #[error("specify either `interval_secs` or `cron`")]
    NoSelector,

    #[error("interval schedules need a caller id as the first `class_args` entry")]
    MissingCallerId,

    #[error(transparent)]
    Locate(#[from] LocateError),
}

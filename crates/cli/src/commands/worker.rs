// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tw worker`: one worker process on stdin/stdout.

use std::io;

use anyhow::Result;
use tw_worker::{ChannelError, StdioSink, StdioSource, WorkerProcess};

use crate::builtins;

pub fn run() -> Result<()> {
    let source = StdioSource::new(io::stdin().lock());
    let sink = StdioSink::new(io::stdout().lock());
    let mut worker = WorkerProcess::new(builtins::registry(), source, sink);

    match worker.run() {
        Ok(_) => Ok(()),
        // Parent went away without sending the sentinel
        Err(ChannelError::Closed) => {
            tracing::warn!("stdin closed before shutdown sentinel");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup.

use std::io::IsTerminal;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "tw.log";

/// Install the global subscriber.
///
/// Filter comes from `TW_LOG` (default `info`). With `TW_LOG_DIR` set, logs
/// go to a daily rolling file there; otherwise, or when that directory
/// cannot be used, to stderr. The returned guard must live until exit so
/// buffered file output is flushed.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(tw_core::env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(dir) = tw_core::env::log_dir() else {
        init_stderr(filter);
        return None;
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(&dir);
    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init().ok()?;
            Some(guard)
        }
        Err(e) => {
            init_stderr(filter);
            warn!(dir = %dir.display(), error = %e, "log directory unusable, logging to stderr");
            None
        }
    }
}

fn init_stderr(filter: EnvFilter) {
    let layer =
        fmt::layer().with_ansi(std::io::stderr().is_terminal()).with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

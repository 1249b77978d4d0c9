// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;

/// Queue used when neither the caller nor `TW_DEFAULT_QUEUE` names one.
pub const DEFAULT_QUEUE_NAME: &str = "default";

/// Process-wide default queue: TW_DEFAULT_QUEUE > "default"
pub fn default_queue_name() -> String {
    std::env::var("TW_DEFAULT_QUEUE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string())
}

/// The caller's queue, unchanged, or the default when it is missing or blank.
pub fn queue_or_default(queue: Option<&str>) -> String {
    match queue {
        Some(q) if !q.trim().is_empty() => q.to_string(),
        _ => default_queue_name(),
    }
}

/// Log filter directive (default `info`)
pub fn log_filter() -> String {
    std::env::var("TW_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".to_string())
}

/// Directory for rolling log files. When unset, logs go to stderr.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("TW_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

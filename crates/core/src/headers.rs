// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution hint headers.
//!
//! Hints travel as a comma-joined token list in a fixed order:
//! `reply-requested`, `guarantee`, `retry-count:<n>`. A missing token means
//! the hint is disabled. Acting on the hints (replies, redelivery, retries)
//! is left to the broker and scheduler.

use std::fmt;

use thiserror::Error;

pub const REPLY_REQUESTED: &str = "reply-requested";
pub const GUARANTEE: &str = "guarantee";
pub const RETRY_COUNT_PREFIX: &str = "retry-count:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("invalid retry count in header token `{0}`")]
    InvalidRetryCount(String),
}

/// The set of enabled execution hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderFlags {
    pub reply_requested: bool,
    pub guarantee: bool,
    /// Advisory only; zero means no retries and emits no token.
    pub retry_count: u32,
}

impl HeaderFlags {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        set {
            reply_requested: bool,
            guarantee: bool,
            retry_count: u32,
        }
    }

    /// Enabled tokens in canonical order.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(3);
        if self.reply_requested {
            tokens.push(REPLY_REQUESTED.to_string());
        }
        if self.guarantee {
            tokens.push(GUARANTEE.to_string());
        }
        if self.retry_count > 0 {
            tokens.push(format!("{}{}", RETRY_COUNT_PREFIX, self.retry_count));
        }
        tokens
    }

    /// Comma-joined header frame.
    pub fn to_csv(&self) -> String {
        self.tokens().join(",")
    }

    /// Parse a header frame.
    ///
    /// Unrecognized tokens are skipped so newer producers can add hints.
    pub fn parse(csv: &str) -> Result<Self, HeaderError> {
        let mut flags = Self::default();
        for token in csv.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token == REPLY_REQUESTED {
                flags.reply_requested = true;
            } else if token == GUARANTEE {
                flags.guarantee = true;
            } else if let Some(count) = token.strip_prefix(RETRY_COUNT_PREFIX) {
                flags.retry_count = match count.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(HeaderError::InvalidRetryCount(token.to_string())),
                };
            } else {
                tracing::debug!(token, "ignoring unknown header token");
            }
        }
        Ok(flags)
    }

    pub fn is_empty(&self) -> bool {
        !self.reply_requested && !self.guarantee && self.retry_count == 0
    }
}

impl fmt::Display for HeaderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv())
    }
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers available to `tw worker` under the `tw.builtins` module.

use std::time::Duration;

use serde_json::{json, Value};
use tw_worker::{Args, ClassBuilder, HandlerError, HandlerResult, Registry};

pub const MODULE: &str = "tw.builtins";

/// Upper bound for `sleep`, in seconds.
const MAX_SLEEP_SECS: f64 = 3600.0;

pub fn registry() -> Registry {
    Registry::builder()
        .function(MODULE, "echo", echo)
        .function(MODULE, "sleep", sleep)
        .function(MODULE, "fail", fail)
        .class(
            MODULE,
            "Counter",
            ClassBuilder::new(Counter::new).method("incr", Counter::incr),
        )
        .build()
}

/// Log and return the arguments.
fn echo(args: Args) -> HandlerResult {
    let value = json!({ "args": args.positional, "kwargs": args.keyword });
    tracing::info!(%value, "echo");
    Ok(value)
}

/// `sleep(secs)`: block for up to an hour.
fn sleep(args: Args) -> HandlerResult {
    let secs: f64 = args.arg_or(0, "secs", 0.0)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(HandlerError::msg(format!("invalid sleep duration {secs}")));
    }
    std::thread::sleep(Duration::from_secs_f64(secs.min(MAX_SLEEP_SECS)));
    Ok(Value::Null)
}

/// Always fails, with `message` if given.
fn fail(args: Args) -> HandlerResult {
    let message: String = args.arg_or(0, "message", "requested failure".to_string())?;
    Err(HandlerError::Failed(message))
}

/// Counter(start=0); `incr(by=1)` returns the new value.
struct Counter {
    value: i64,
}

impl Counter {
    fn new(args: Args) -> Result<Self, HandlerError> {
        Ok(Self { value: args.arg_or(0, "start", 0)? })
    }

    fn incr(&mut self, args: Args) -> HandlerResult {
        let by: i64 = args.arg_or(0, "by", 1)?;
        self.value = self
            .value
            .checked_add(by)
            .ok_or_else(|| HandlerError::msg("counter overflow"))?;
        Ok(json!(self.value))
    }
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod tests;

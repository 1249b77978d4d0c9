// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw: submit jobs and run workers from the command line.
//!
//! Submission commands write one framed message to stdout; logs always go
//! to stderr (or to `TW_LOG_DIR`) so stdout stays a clean wire stream.

mod builtins;
mod commands;
mod exit_error;
mod logging;

use clap::{Parser, Subcommand};

use crate::commands::{submit, worker};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "tw", version, about = "Job dispatch over framed messages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a one-off job (REQUEST)
    Defer(submit::DeferArgs),
    /// Submit a recurring job (SCHEDULE)
    Schedule(submit::ScheduleArgs),
    /// Cancel a recurring job (UNSCHEDULE)
    Unschedule(submit::UnscheduleArgs),
    /// Run a worker on stdin/stdout with the builtin handlers
    Worker,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Defer(args) => submit::defer(args),
        Command::Schedule(args) => submit::schedule(args),
        Command::Unschedule(args) => submit::unschedule(args),
        Command::Worker => worker::run(),
    }
}

fn main() {
    let cli = Cli::parse();
    let _guard = logging::init();

    if let Err(e) = run(cli) {
        let code = e.downcast_ref::<ExitError>().map_or(2, |exit| exit.code);
        eprintln!("tw: {e:#}");
        std::process::exit(code);
    }
}

//! Shared helpers for `tw` specs.

#![allow(dead_code)]

use std::io::Cursor;

use assert_cmd::Command;
use serde_json::Value;
use tw_wire::{blocking, read_frames, WireMessage};

pub use serde_json::json;
use similar_asserts::assert_eq;
pub use tw_core::{decode_run, JobDescriptor};
pub use tw_wire::{Command as WireCommand, RequestEnvelope, ScheduleEnvelope};

/// A `tw` invocation with an isolated environment.
pub struct Cli {
    cmd: Command,
    stdin: Option<Vec<u8>>,
}

pub fn cli() -> Cli {
    let mut cmd = Command::cargo_bin("tw").expect("tw binary not built");
    cmd.env_remove("TW_DEFAULT_QUEUE").env_remove("TW_LOG_DIR").env("TW_LOG", "info");
    Cli { cmd, stdin: None }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Feed length-prefixed JSON values on stdin.
    pub fn stdin_messages(mut self, values: &[Value]) -> Self {
        let mut buf = Vec::new();
        for value in values {
            blocking::write_message(&mut buf, value.to_string().as_bytes()).unwrap();
        }
        self.stdin = Some(buf);
        self
    }

    fn output(mut self) -> std::process::Output {
        if let Some(stdin) = self.stdin.take() {
            self.cmd.write_stdin(stdin);
        }
        self.cmd.output().unwrap()
    }

    pub fn passes(self) -> Run {
        let run = Run::from(self.output());
        assert!(run.code == Some(0), "expected success, got {:?}\nstderr:\n{}", run.code, run.stderr);
        run
    }

    pub fn fails_with(self, code: i32) -> Run {
        let run = Run::from(self.output());
        assert!(run.code == Some(code), "expected exit {code}, got {:?}\nstderr:\n{}", run.code, run.stderr);
        run
    }
}

/// Captured result of a finished `tw` process.
pub struct Run {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_empty(self) -> Self {
        assert!(self.stdout.is_empty(), "expected empty stdout, got {} bytes", self.stdout.len());
        self
    }

    /// Every framed message on stdout.
    pub fn messages(&self) -> Vec<WireMessage> {
        let mut reader = Cursor::new(&self.stdout);
        let mut messages = Vec::new();
        while (reader.position() as usize) < self.stdout.len() {
            messages.push(read_frames(&mut reader).unwrap());
        }
        messages
    }

    /// The single framed message on stdout.
    pub fn message(&self) -> WireMessage {
        let mut messages = self.messages();
        assert_eq!(messages.len(), 1, "expected one message on stdout");
        messages.remove(0)
    }

    /// Every length-prefixed JSON value on stdout.
    pub fn values(&self) -> Vec<Value> {
        let mut reader = Cursor::new(&self.stdout);
        let mut values = Vec::new();
        while (reader.position() as usize) < self.stdout.len() {
            let body = blocking::read_message(&mut reader).unwrap();
            values.push(serde_json::from_slice(&body).unwrap());
        }
        values
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job descriptors: the serialized form of a callable invocation.
//!
//! A descriptor names a target by import `path` plus `callable` member. When
//! the path carries a class suffix (`module:ClassName`), the class is built
//! from `class_args`/`class_kwargs` and `callable` is a method on the new
//! instance; otherwise `callable` is a module-level function.
//!
//! On the wire a descriptor always travels inside a run message:
//! `["run", {"path": .., "callable": .., "args": [..], "kwargs": {..}, ..}]`.

use std::fmt;

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::locate::{CallableLocation, Locate, LocateError};

/// Subcommand tag of every run message.
pub const RUN_SUBCOMMAND: &str = "run";

/// Separates the module path from the class name in a descriptor path.
pub const CLASS_SEPARATOR: char = ':';

/// Keyword arguments, in caller order.
pub type Kwargs = IndexMap<String, Value>;

/// Schema violations found when decoding or validating a descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed run message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown subcommand `{0}` (expected `run`)")]
    UnknownSubcommand(String),

    #[error("descriptor has an empty path")]
    EmptyPath,

    #[error("descriptor for `{path}` has an empty callable")]
    EmptyCallable { path: String },

    #[error("path `{path}` has an empty module segment")]
    EmptyModule { path: String },

    #[error("path `{path}` has an empty class segment")]
    EmptyClass { path: String },

    #[error("path `{path}` has more than one class separator")]
    NestedClass { path: String },
}

/// A callable invocation ready for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub path: String,
    pub callable: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: Kwargs,
    #[serde(default)]
    pub class_args: Vec<Value>,
    #[serde(default)]
    pub class_kwargs: Kwargs,
}

impl JobDescriptor {
    /// Descriptor with empty argument collections.
    pub fn new(path: impl Into<String>, callable: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            callable: callable.into(),
            args: Vec::new(),
            kwargs: Kwargs::new(),
            class_args: Vec::new(),
            class_kwargs: Kwargs::new(),
        }
    }

    /// Locate `target` and build a descriptor for it.
    ///
    /// Fails when the target is not callable or its location has an empty
    /// member name or import path.
    pub fn for_callable<T: Locate + ?Sized>(target: &T) -> Result<Self, LocateError> {
        let CallableLocation { path, name } = target.locate()?;
        if name.is_empty() {
            return Err(LocateError::NoName { path });
        }
        if path.is_empty() {
            return Err(LocateError::NoPath { name });
        }
        Ok(Self::new(path, name))
    }

    crate::setters! {
        set {
            args: Vec<Value>,
            kwargs: Kwargs,
            class_args: Vec<Value>,
            class_kwargs: Kwargs,
        }
    }

    /// Split the path into module and optional class.
    pub fn call_path(&self) -> Result<CallPath, DescriptorError> {
        CallPath::parse(&self.path)
    }

    /// Check the schema invariants: non-empty path and callable, well-formed class suffix.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        self.call_path()?;
        if self.callable.is_empty() {
            return Err(DescriptorError::EmptyCallable { path: self.path.clone() });
        }
        Ok(())
    }

    /// First constructor argument, used as the caller identity of interval schedules.
    pub fn caller_id(&self) -> Option<&Value> {
        self.class_args.first()
    }
}

/// A descriptor path split at the class separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPath {
    pub module: String,
    pub class: Option<String>,
}

impl CallPath {
    pub fn parse(path: &str) -> Result<Self, DescriptorError> {
        if path.is_empty() {
            return Err(DescriptorError::EmptyPath);
        }
        let Some((module, class)) = path.split_once(CLASS_SEPARATOR) else {
            return Ok(Self { module: path.to_string(), class: None });
        };
        if module.is_empty() {
            return Err(DescriptorError::EmptyModule { path: path.to_string() });
        }
        if class.is_empty() {
            return Err(DescriptorError::EmptyClass { path: path.to_string() });
        }
        if class.contains(CLASS_SEPARATOR) {
            return Err(DescriptorError::NestedClass { path: path.to_string() });
        }
        Ok(Self { module: module.to_string(), class: Some(class.to_string()) })
    }
}

impl fmt::Display for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            Some(class) => write!(f, "{}{}{}", self.module, CLASS_SEPARATOR, class),
            None => f.write_str(&self.module),
        }
    }
}

/// `["run", descriptor]`, the payload frame of REQUEST and SCHEDULE commands.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMessage(pub JobDescriptor);

impl Serialize for RunMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (RUN_SUBCOMMAND, &self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RunMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (subcommand, descriptor) = <(String, JobDescriptor)>::deserialize(deserializer)?;
        if subcommand != RUN_SUBCOMMAND {
            return Err(serde::de::Error::custom(DescriptorError::UnknownSubcommand(subcommand)));
        }
        Ok(RunMessage(descriptor))
    }
}

/// Serialize a descriptor as a run message.
pub fn encode_run(descriptor: &JobDescriptor) -> Result<String, serde_json::Error> {
    serde_json::to_string(&(RUN_SUBCOMMAND, descriptor))
}

/// Parse and validate a run message.
pub fn decode_run(payload: &str) -> Result<JobDescriptor, DescriptorError> {
    if let Ok((subcommand, IgnoredAny)) = serde_json::from_str::<(String, IgnoredAny)>(payload) {
        if subcommand != RUN_SUBCOMMAND {
            return Err(DescriptorError::UnknownSubcommand(subcommand));
        }
    }
    let RunMessage(descriptor) = serde_json::from_str(payload)?;
    descriptor.validate()?;
    Ok(descriptor)
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;

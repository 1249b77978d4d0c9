// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating callables by import path and member name.

use thiserror::Error;

/// Failure to turn a reference into an importable location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("not a callable: {0}")]
    NotCallable(String),

    #[error("callable in `{path}` has no name")]
    NoName { path: String },

    #[error("callable `{name}` has no import path")]
    NoPath { name: String },
}

/// Where a callable lives: `path` is `module` or `module:Class`, `name` the member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallableLocation {
    pub path: String,
    pub name: String,
}

impl CallableLocation {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into() }
    }

    /// Location of a module-level function.
    pub fn function(module: &str, name: impl Into<String>) -> Self {
        Self::new(module, name)
    }

    /// Location of a method on a class defined in `module`.
    pub fn method(module: &str, class: &str, name: impl Into<String>) -> Self {
        Self::new(format!("{}:{}", module, class), name)
    }
}

/// Anything that can report where its callable lives.
///
/// Locations may come back with empty fields; descriptor construction
/// rejects those.
pub trait Locate {
    fn locate(&self) -> Result<CallableLocation, LocateError>;
}

impl Locate for CallableLocation {
    fn locate(&self) -> Result<CallableLocation, LocateError> {
        Ok(self.clone())
    }
}

/// Dotted targets: `pkg.module.func` or `pkg.module:Class.method`.
impl Locate for str {
    fn locate(&self) -> Result<CallableLocation, LocateError> {
        let target = self.trim();
        if target.is_empty() || target.chars().any(char::is_whitespace) {
            return Err(LocateError::NotCallable(self.to_string()));
        }
        match target.rsplit_once('.') {
            // A dot inside the module part of `module:Class` is not a member separator
            Some((path, name)) if !name.contains(':') => Ok(CallableLocation::new(path, name)),
            _ => Ok(CallableLocation::new("", target)),
        }
    }
}

impl Locate for String {
    fn locate(&self) -> Result<CallableLocation, LocateError> {
        self.as_str().locate()
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    fn locate(&self) -> Result<CallableLocation, LocateError> {
        (**self).locate()
    }
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;

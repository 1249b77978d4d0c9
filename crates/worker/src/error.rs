// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use tw_core::DescriptorError;

/// Failure reported by a handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing argument `{0}`")]
    MissingArgument(String),

    #[error("invalid argument `{name}`: {source}")]
    InvalidArgument { name: String, source: serde_json::Error },

    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    pub fn msg(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }
}

/// Why a job did not complete successfully.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid job: {0}")]
    Decode(#[from] DescriptorError),

    #[error("module `{0}` not found")]
    ModuleNotFound(String),

    #[error("class `{class}` not found in module `{module}`")]
    ClassNotFound { module: String, class: String },

    #[error("`{path}` has no callable `{callable}`")]
    MemberNotFound { path: String, callable: String },

    #[error("constructing `{path}` failed: {source}")]
    Construction { path: String, source: HandlerError },

    #[error("`{path}.{callable}` failed: {source}")]
    Execution { path: String, callable: String, source: HandlerError },

    #[error("`{path}.{callable}` panicked: {message}")]
    Panicked { path: String, callable: String, message: String },
}

/// Coarse classification used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobErrorKind {
    /// The job could not be read as a descriptor.
    Decode,
    /// Module, class, or member missing.
    Resolution,
    /// The target (or its constructor) failed.
    Execution,
}

tw_core::simple_display! {
    JobErrorKind {
        Decode => "decode",
        Resolution => "resolution",
        Execution => "execution",
    }
}

impl JobError {
    pub fn kind(&self) -> JobErrorKind {
        match self {
            JobError::Decode(_) => JobErrorKind::Decode,
            JobError::ModuleNotFound(_)
            | JobError::ClassNotFound { .. }
            | JobError::MemberNotFound { .. } => JobErrorKind::Resolution,
            JobError::Construction { .. }
            | JobError::Execution { .. }
            | JobError::Panicked { .. } => JobErrorKind::Execution,
        }
    }
}

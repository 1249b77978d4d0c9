// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve and run one job.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::Value;
use tw_core::JobDescriptor;

use crate::error::{HandlerError, JobError};
use crate::registry::{Args, Registry};

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run `f`, turning a panic into [`JobError::Panicked`].
fn contain<T>(
    job: &JobDescriptor,
    f: impl FnOnce() -> Result<T, HandlerError>,
) -> Result<Result<T, HandlerError>, JobError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| JobError::Panicked {
        path: job.path.clone(),
        callable: job.callable.clone(),
        message: panic_message(payload),
    })
}

/// Execute `job` against `registry`.
///
/// For `module:Class` paths the class is resolved and constructed with the
/// class arguments, then `callable` is looked up on the instance; otherwise
/// `callable` is a module function. Handler failures and panics come back
/// as errors, never unwinding past this call.
pub fn execute_job(registry: &Registry, job: &JobDescriptor) -> Result<Value, JobError> {
    job.validate()?;
    let call_path = job.call_path()?;

    let module = registry
        .module(&call_path.module)
        .ok_or_else(|| JobError::ModuleNotFound(call_path.module.clone()))?;
    let args = Args::new(job.args.clone(), job.kwargs.clone());

    let Some(class_name) = call_path.class.as_deref() else {
        let function = module.function(&job.callable).ok_or_else(|| JobError::MemberNotFound {
            path: job.path.clone(),
            callable: job.callable.clone(),
        })?;
        return contain(job, || function(args))?.map_err(|source| JobError::Execution {
            path: job.path.clone(),
            callable: job.callable.clone(),
            source,
        });
    };

    let class = module.class(class_name).ok_or_else(|| JobError::ClassNotFound {
        module: call_path.module.clone(),
        class: class_name.to_string(),
    })?;
    let class_args = Args::new(job.class_args.clone(), job.class_kwargs.clone());
    let mut instance = contain(job, || class.construct(class_args))?
        .map_err(|source| JobError::Construction { path: job.path.clone(), source })?;

    let method = class.method(&job.callable).ok_or_else(|| JobError::MemberNotFound {
        path: job.path.clone(),
        callable: job.callable.clone(),
    })?;
    contain(job, || method(&mut *instance, args))?.map_err(|source| JobError::Execution {
        path: job.path.clone(),
        callable: job.callable.clone(),
        source,
    })
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;

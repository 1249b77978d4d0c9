// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule identity.
//!
//! A schedule is identified by its caller identity (first constructor
//! argument) together with the target path and callable. UNSCHEDULE carries
//! the same three values, so the scheduler can match a cancellation to the
//! schedule it cancels without any id being returned to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::descriptor::JobDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleKey(String);

impl ScheduleKey {
    /// Identity of a schedule, or `None` when the descriptor carries no caller identity.
    pub fn for_descriptor(descriptor: &JobDescriptor) -> Option<Self> {
        descriptor
            .caller_id()
            .map(|caller_id| Self::new(caller_id, &descriptor.path, &descriptor.callable))
    }

    pub fn new(caller_id: &Value, path: &str, callable: &str) -> Self {
        let identity = json!({
            "caller_id": canonical(caller_id),
            "path": path,
            "callable": callable,
        });
        let digest = Sha256::digest(identity.to_string().as_bytes());
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `value` with every object's keys sorted, so equal identities hash equally
/// whatever order their keys arrived in.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), canonical(v))).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "schedule_key_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use serde_json::Value;

use crate::{JobDescriptor, Kwargs};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for descriptors and hints.
pub mod strategies {
    use proptest::prelude::*;
    use serde_json::Value;

    use crate::{HeaderFlags, JobDescriptor, Kwargs};

    /// Identifier-like names: never empty, never containing `:` or `.`.
    pub fn arb_ident() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,11}"
    }

    pub fn arb_module() -> impl Strategy<Value = String> {
        prop::collection::vec(arb_ident(), 1..4).prop_map(|parts| parts.join("."))
    }

    pub fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[ -~]{0,16}".prop_map(Value::from),
        ]
    }

    pub fn arb_kwargs() -> impl Strategy<Value = Kwargs> {
        prop::collection::vec((arb_ident(), arb_scalar()), 0..4)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    pub fn arb_descriptor() -> impl Strategy<Value = JobDescriptor> {
        (
            arb_module(),
            prop::option::of(arb_ident()),
            arb_ident(),
            prop::collection::vec(arb_scalar(), 0..4),
            arb_kwargs(),
            prop::collection::vec(arb_scalar(), 0..3),
            arb_kwargs(),
        )
            .prop_map(|(module, class, callable, args, kwargs, class_args, class_kwargs)| {
                let path = match class {
                    Some(class) => format!("{}:{}", module, class),
                    None => module,
                };
                JobDescriptor::new(path, callable)
                    .args(args)
                    .kwargs(kwargs)
                    .class_args(class_args)
                    .class_kwargs(class_kwargs)
            })
    }

    pub fn arb_headers() -> impl Strategy<Value = HeaderFlags> {
        (any::<bool>(), any::<bool>(), 0u32..10).prop_map(|(reply, guarantee, retries)| {
            HeaderFlags::new().reply_requested(reply).guarantee(guarantee).retry_count(retries)
        })
    }
}

// ── Descriptor factories ────────────────────────────────────────────────

/// `module.callable(*args)`
pub fn function_job(module: &str, callable: &str, args: Vec<Value>) -> JobDescriptor {
    JobDescriptor::new(module, callable).args(args)
}

/// `module:Class(*class_args).callable(*args)`
pub fn method_job(
    module: &str,
    class: &str,
    callable: &str,
    class_args: Vec<Value>,
    args: Vec<Value>,
) -> JobDescriptor {
    JobDescriptor::new(format!("{}:{}", module, class), callable)
        .class_args(class_args)
        .args(args)
}

/// Build kwargs from `(key, value)` pairs.
pub fn kwargs<const N: usize>(pairs: [(&str, Value); N]) -> Kwargs {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
